//! Replacement strings for substitution
//!
//! Replacements use backslash references the way ed and sed do. The `regex`
//! crate expands `$name` instead, so references are rewritten:
//!
//! - `\1`..`\99` → `${1}`..`${99}`, `\g<n>` / `\g<name>` → `${n}` / `${name}`
//! - `\\` → `\`, `\n` → newline, `\t` → tab
//! - a literal `$` → `$$`
//!
//! References to groups the pattern does not have are rejected as pattern
//! syntax errors instead of silently expanding to nothing.

use regex::Regex;

/// Rewrite `replacement` for use with `re`, validating group references
pub fn expand_references(re: &Regex, replacement: &str) -> Result<String, regex::Error> {
    let mut result = String::with_capacity(replacement.len());
    let mut chars = replacement.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '$' => result.push_str("$$"),
            '\\' => {
                let Some(&(_, next)) = chars.peek() else {
                    return Err(syntax_error(format!("bad escape (end of pattern) at position {}", pos)));
                };
                chars.next();
                match next {
                    '0'..='9' => {
                        let mut group = next.to_string();
                        if let Some(&(_, d)) = chars.peek() {
                            if d.is_ascii_digit() {
                                group.push(d);
                                chars.next();
                            }
                        }
                        push_group(re, &mut result, &group, pos)?;
                    }
                    'g' => {
                        let name = take_group_name(&mut chars, pos)?;
                        push_group(re, &mut result, &name, pos)?;
                    }
                    '\\' => result.push('\\'),
                    'n' => result.push('\n'),
                    't' => result.push('\t'),
                    other => {
                        // Unknown escapes such as `\q` pass through literally
                        // rather than failing
                        result.push('\\');
                        result.push(other);
                    }
                }
            }
            _ => result.push(c),
        }
    }

    Ok(result)
}

fn take_group_name(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    pos: usize,
) -> Result<String, regex::Error> {
    if !matches!(chars.next(), Some((_, '<'))) {
        return Err(syntax_error(format!("missing < at position {}", pos + 2)));
    }
    let mut name = String::new();
    for (_, c) in chars.by_ref() {
        if c == '>' {
            if name.is_empty() {
                return Err(syntax_error(format!("missing group name at position {}", pos + 3)));
            }
            return Ok(name);
        }
        name.push(c);
    }
    Err(syntax_error(format!("missing >, unterminated name at position {}", pos + 3)))
}

fn push_group(re: &Regex, result: &mut String, group: &str, pos: usize) -> Result<(), regex::Error> {
    let known = match group.parse::<usize>() {
        Ok(index) => index < re.captures_len(),
        Err(_) => re.capture_names().flatten().any(|n| n == group),
    };
    if !known {
        return Err(syntax_error(format!("invalid group reference {} at position {}", group, pos + 1)));
    }
    result.push_str("${");
    result.push_str(group);
    result.push('}');
    Ok(())
}

fn syntax_error(message: String) -> regex::Error {
    regex::Error::Syntax(message)
}
