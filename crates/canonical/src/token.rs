/// Split a symptom phrase into keyword tokens.
///
/// Tokens are separated by any run of Unicode whitespace or ASCII commas;
/// empty fragments are dropped. The caller decides which tokens are long
/// enough to count.
///
/// ```rust
/// use canonical::split_keywords;
///
/// let tokens: Vec<&str> = split_keywords("엔진 떨림,소음 , 경고등").collect();
/// assert_eq!(tokens, vec!["엔진", "떨림", "소음", "경고등"]);
/// ```
pub fn split_keywords(text: &str) -> impl Iterator<Item = &str> {
    text.split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|token| !token.is_empty())
}
