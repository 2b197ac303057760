use crate::core::config::DEFAULT_EXIT_CODE_FORMAT;

/// Fills the `{code}` placeholder of an exit-code template.
///
/// `{{` and `}}` are literal braces. A template with any other field or a
/// stray brace is unusable, and the default template is used instead.
pub fn render_exit_code(template: &str, code: i32) -> String {
    try_render(template, code).unwrap_or_else(|| {
        try_render(DEFAULT_EXIT_CODE_FORMAT, code).unwrap_or_else(|| code.to_string())
    })
}

fn try_render(template: &str, code: i32) -> Option<String> {
    let mut rendered = String::with_capacity(template.len() + 4);
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                rendered.push('{');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => field.push(ch),
                        None => return None,
                    }
                }
                if field != "code" {
                    return None;
                }
                rendered.push_str(&code.to_string());
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                rendered.push('}');
            }
            '}' => return None,
            c => rendered.push(c),
        }
    }

    Some(rendered)
}
