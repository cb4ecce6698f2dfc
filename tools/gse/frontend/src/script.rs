use anyhow::{Context, Result, bail};
use gba_hal::input::Keys;
use gse_core::{InputScript, Segment};

/// Parse a button script like `up:30,none:10,a+b:1`.
///
/// Each comma-separated segment is a `+`-joined list of buttons (or `none`)
/// and how many frames to hold them.
pub fn parse(text: &str) -> Result<InputScript> {
    let mut segments = Vec::new();
    for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        segments.push(parse_segment(part).with_context(|| format!("bad script segment `{part}`"))?);
    }
    Ok(InputScript::from_segments(&segments)?)
}

fn parse_segment(part: &str) -> Result<Segment> {
    let Some((buttons, frames)) = part.split_once(':') else {
        bail!("expected `buttons:frames`");
    };
    let frames = frames.trim().parse::<u32>().context("frame count is not a number")?;
    let mut keys = Keys::empty();
    for name in buttons.split('+').map(str::trim) {
        if name.eq_ignore_ascii_case("none") {
            continue;
        }
        match Keys::from_name(&name.to_ascii_uppercase()) {
            Some(key) => keys |= key,
            None => bail!("unknown button `{name}`"),
        }
    }
    Ok(Segment { keys, frames })
}
