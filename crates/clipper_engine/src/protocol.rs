/// Parses one stderr line of the form `PROGRESS:<percent>:<label>`.
///
/// The first two colons are the only delimiters; a label may itself contain
/// colons and is returned verbatim apart from surrounding whitespace. Any
/// line that does not match is plain diagnostic output and yields `None`.
pub fn parse_progress_marker(line: &str) -> Option<(u8, &str)> {
    let rest = line.trim().strip_prefix("PROGRESS:")?;
    let (percent, label) = rest.split_once(':')?;
    let percent: u8 = percent.trim().parse().ok()?;
    Some((percent.min(100), label.trim()))
}
