use anyhow::Result;
use inlay::cli::App;

fn main() -> Result<()> {
    let mut app = App::from_args()?;
    let args = inlay::cli::Args::parse_args();

    app.run(args)?;

    Ok(())
}
