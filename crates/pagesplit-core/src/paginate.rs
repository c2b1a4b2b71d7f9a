/// Split raw text into synthetic pages of roughly `target_chars` characters.
///
/// Lines are never split: a page is closed as soon as it grows past
/// `target_chars`, so the line that crossed the threshold stays on it and a
/// page may run over. Concatenating the returned pages gives back `text`.
/// Whitespace-only input produces no pages.
pub fn paginate(text: &str, target_chars: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut pages = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for line in text.split_inclusive('\n') {
        current.push_str(line);
        current_chars += line.chars().count();
        if current_chars > target_chars {
            pages.push(std::mem::take(&mut current));
            current_chars = 0;
        }
    }
    if !current.is_empty() {
        pages.push(current);
    }

    tracing::debug!(pages = pages.len(), "split raw text into pages");
    pages
}
