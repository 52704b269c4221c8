/// Split comma-separated basket text into item names.
///
/// Pieces are trimmed and empty pieces dropped; order and duplicates are kept.
pub fn parse_basket_items(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
