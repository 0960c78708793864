use std::sync::OnceLock;

use regex::Regex;

/// Substitute `${VAR}` and `${VAR:-fallback}` with environment values
///
/// Runs on the raw TOML text before parsing. Comment lines are copied
/// through untouched so commented-out settings never need their variables.
pub fn expand_env(input: &str) -> Result<String, String> {
    fn re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        // 1: variable name, 2: fallback after `:-`
        RE.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("must be valid regex")
        })
    }

    let mut output = String::with_capacity(input.len());

    for (index, line) in input.split_inclusive('\n').enumerate() {
        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut cursor = 0;

        for captures in re().captures_iter(line) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };

            output.push_str(&line[cursor..whole.start()]);

            match (std::env::var(name.as_str()), captures.get(2)) {
                (Ok(value), _) => output.push_str(&value),
                (Err(_), Some(fallback)) => output.push_str(fallback.as_str()),
                (Err(_), None) => {
                    return Err(format!(
                        "environment variable `{}` is not set (line {})",
                        name.as_str(),
                        index + 1
                    ));
                }
            }

            cursor = whole.end();
        }

        output.push_str(&line[cursor..]);
    }

    Ok(output)
}
