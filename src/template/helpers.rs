// ABOUTME: Handlebars helper functions for template rendering
// ABOUTME: Implements the built-in scalar and block helpers registered on every engine

use handlebars::{
    BlockContext, Context, Handlebars, Helper, Output, RenderContext, RenderError, Renderable,
};
use serde_json::Value as JsonValue;

/// Study status helper - classifies a passing year against the 2025 cutoff
pub fn study_status_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let year = h
        .param(0)
        .and_then(|v| v.value().as_i64())
        .ok_or_else(|| RenderError::new("study_status helper requires a numeric year parameter"))?;

    let status = if year < 2025 { "passed" } else { "failed" };
    out.write(status)?;
    Ok(())
}

/// Membership helper - classifies an age against the 35 threshold
pub fn membership_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let age = h
        .param(0)
        .and_then(|v| v.value().as_i64())
        .ok_or_else(|| RenderError::new("membership helper requires a numeric age parameter"))?;

    let verdict = if age == 35 {
        "membership Granted"
    } else if age < 35 {
        "membership denied"
    } else {
        "membership pending"
    };

    out.write(verdict)?;
    Ok(())
}

/// Uppercase helper
pub fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("upper helper requires input parameter"))?;

    out.write(&input.to_uppercase())?;
    Ok(())
}

/// Lowercase helper
pub fn lower_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("lower helper requires input parameter"))?;

    out.write(&input.to_lowercase())?;
    Ok(())
}

/// Student status block helper - rewrites each record's passing_year field
/// to "passed"/"not passed" and renders the block body once per record
pub fn student_status_helper<'reg, 'rc>(
    h: &Helper<'reg, 'rc>,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let records = h
        .param(0)
        .and_then(|v| v.value().as_array())
        .cloned()
        .ok_or_else(|| RenderError::new("student_status helper requires an array parameter"))?;

    let template = match h.template() {
        Some(t) => t,
        None => return Ok(()),
    };

    for mut record in records {
        let obj = record.as_object_mut().ok_or_else(|| {
            RenderError::new("student_status helper requires an array of records")
        })?;

        let year = obj
            .get("passing_year")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| {
                RenderError::new("student_status records need a numeric passing_year field")
            })?;

        let status = if year < 2015 { "passed" } else { "not passed" };
        obj.insert(
            "passing_year".to_string(),
            JsonValue::String(status.to_string()),
        );

        // Rebind the rendering scope to this record for the block body
        let mut block = BlockContext::new();
        block.set_base_value(record);
        rc.push_block(block);
        template.render(r, ctx, rc, out)?;
        rc.pop_block();
    }

    Ok(())
}

/// Athlete size block helper - rewrites each record's height field with a
/// verdict string and renders the block body once per record
pub fn athlete_size_helper<'reg, 'rc>(
    h: &Helper<'reg, 'rc>,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let records = h
        .param(0)
        .and_then(|v| v.value().as_array())
        .cloned()
        .ok_or_else(|| RenderError::new("athlete_size helper requires an array parameter"))?;

    let template = match h.template() {
        Some(t) => t,
        None => return Ok(()),
    };

    for mut record in records {
        let obj = record
            .as_object_mut()
            .ok_or_else(|| RenderError::new("athlete_size helper requires an array of records"))?;

        let height = obj.get("height").and_then(|v| v.as_f64()).ok_or_else(|| {
            RenderError::new("athlete_size records need a numeric height field")
        })?;

        let verdict = if height < 6.4 {
            "Athlete is tall enough."
        } else {
            "Athlete must hit the gym first."
        };
        obj.insert("height".to_string(), JsonValue::String(verdict.to_string()));

        let mut block = BlockContext::new();
        block.set_base_value(record);
        rc.push_block(block);
        template.render(r, ctx, rc, out)?;
        rc.pop_block();
    }

    Ok(())
}

/// Lucky draw block helper - draws three numbers in 1..=100, classifies them,
/// stamps each record's size field with the classification, renders the block
/// body per record, and appends the classification line once at the end
pub fn lucky_draw_helper<'reg, 'rc>(
    h: &Helper<'reg, 'rc>,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let records = h
        .param(0)
        .and_then(|v| v.value().as_array())
        .cloned()
        .ok_or_else(|| RenderError::new("lucky_draw helper requires an array parameter"))?;

    let a = fastrand::i64(1..=100);
    let b = fastrand::i64(1..=100);
    let c = fastrand::i64(1..=100);

    let show = if a < 100 && a > 50 {
        format!("random 1: {}", a)
    } else if b < 50 && b > 0 {
        format!("random 2: {}", b)
    } else if c <= a || c >= b {
        format!("random 3: {}", c)
    } else {
        "nope!".to_string()
    };

    if let Some(template) = h.template() {
        for mut record in records {
            if let Some(obj) = record.as_object_mut() {
                obj.insert("size".to_string(), JsonValue::String(show.clone()));
            }

            let mut block = BlockContext::new();
            block.set_base_value(record);
            rc.push_block(block);
            template.render(r, ctx, rc, out)?;
            rc.pop_block();
        }
    }

    out.write(&show)?;
    Ok(())
}

/// Register all built-in helpers with a Handlebars instance
pub fn register_helpers(
    handlebars: &mut Handlebars,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    handlebars.register_helper("study_status", Box::new(study_status_helper));
    handlebars.register_helper("membership", Box::new(membership_helper));
    handlebars.register_helper("upper", Box::new(upper_helper));
    handlebars.register_helper("lower", Box::new(lower_helper));
    handlebars.register_helper("student_status", Box::new(student_status_helper));
    handlebars.register_helper("athlete_size", Box::new(athlete_size_helper));
    handlebars.register_helper("lucky_draw", Box::new(lucky_draw_helper));

    Ok(())
}
