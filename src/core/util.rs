//! Common text helpers

/// Uppercase the first letter of a word and lowercase the letters after it.
/// Everything from the first non-letter on is copied unchanged.
pub fn titlecase(word: &str) -> String {
    let mut output = String::with_capacity(word.len());
    for (index, (position, c)) in word.char_indices().enumerate() {
        if !c.is_alphabetic() {
            output.push_str(&word[position..]);
            break;
        }
        if index == 0 {
            output.extend(c.to_uppercase());
        } else {
            output.extend(c.to_lowercase());
        }
    }
    output
}

/// Format numbers as a bracketed, fixed width list ("[  1,  22, 333]")
pub fn format_number_list<T: std::fmt::Display>(values: &[T], width: usize) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|v| format!("{:>width$}", v, width = width))
        .collect();
    format!("[{}]", items.join(", "))
}
