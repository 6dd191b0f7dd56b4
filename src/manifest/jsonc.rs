//! Lenient JSON pre-pass for workload manifests
//!
//! Manifests shipped in packages may carry `//` and `/* */` comments and trailing commas,
//! neither of which `serde_json` accepts. Both are removed here without touching string
//! contents.

/// Strip comments and trailing commas so the result parses as strict JSON
pub fn sanitize(content: &str) -> String {
    strip_trailing_commas(&strip_comments(content))
}

/// Strip `//` line comments and `/* */` block comments outside of strings
pub fn strip_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut in_single_comment = false;
    let mut in_multi_comment = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_single_comment {
            if c == '\n' {
                in_single_comment = false;
                result.push(c);
            }
        } else if in_multi_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                in_multi_comment = false;
                chars.next();
            }
        } else if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else {
            match (c, chars.peek()) {
                ('/', Some('/')) => {
                    in_single_comment = true;
                    chars.next();
                }
                ('/', Some('*')) => {
                    in_multi_comment = true;
                    chars.next();
                }
                ('"', _) => {
                    in_string = true;
                    result.push(c);
                }
                _ => result.push(c),
            }
        }
    }

    result
}

/// Drop commas that are followed only by whitespace before a closing `}` or `]`
pub fn strip_trailing_commas(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut result = String::with_capacity(content.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                result.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}' | ']')) {
                    result.push(c);
                }
            }
            _ => result.push(c),
        }
    }

    result
}
