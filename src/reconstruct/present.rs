use crate::config::Separator;
use crate::util::quote::quote_arg;

/// Puts the name flag in front of the evaluated flags and the image and command behind them.
pub fn assemble(name: Option<&str>, flags: Vec<String>, image: &str, command: Vec<String>) -> Vec<String> {
    let mut tokens = Vec::with_capacity(flags.len() + command.len() + 2);
    if let Some(name) = name.filter(|name| !name.is_empty()) {
        tokens.push(format!("--name={}", quote_arg(name)));
    }
    tokens.extend(flags);
    tokens.push(quote_arg(image));
    tokens.extend(command);
    tokens
}

pub fn present(tokens: &[String], separator: Separator) -> String {
    tokens.join(separator.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_flags_image_command() {
        let tokens = assemble(
            Some("web"),
            vec!["-d".to_string(), "-p 8080:80".to_string()],
            "nginx:1.25",
            vec!["nginx -g \"daemon off;\"".to_string()],
        );
        assert_eq!(
            present(&tokens, Separator::Space),
            r#"--name=web -d -p 8080:80 nginx:1.25 nginx -g "daemon off;""#
        );
    }

    #[test]
    fn omitted_name_and_pretty() {
        let tokens = assemble(None, vec!["-d".to_string()], "alpine", Vec::new());
        assert_eq!(present(&tokens, Separator::Pretty), "-d \\\n\talpine");
    }
}
