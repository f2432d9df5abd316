use std::io::BufRead;

use anyhow::Context;

/// Use the `--password` value, or read one line from stdin.
pub fn resolve(flag: Option<&str>) -> anyhow::Result<String> {
    if let Some(password) = flag {
        return Ok(password.to_string());
    }
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(strip_line_ending(&line).to_string())
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_value_wins() {
        assert_eq!(resolve(Some("secret1")).expect("password"), "secret1");
    }

    #[test]
    fn only_the_line_ending_is_stripped() {
        assert_eq!(strip_line_ending("pa ss \n"), "pa ss ");
        assert_eq!(strip_line_ending("secret\r\n"), "secret");
        assert_eq!(strip_line_ending("secret"), "secret");
    }
}
