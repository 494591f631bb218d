use crate::container::{slice, HealthConfig};
use crate::util::duration::go_duration;
use crate::util::quote::double_quote;

pub fn healthcheck(health: Option<&HealthConfig>, image: Option<&HealthConfig>) -> Vec<String> {
    let Some(health) = health else {
        return Vec::new();
    };
    // inherited from the image, `docker run` will pick it up again
    if image == Some(health) {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let test = slice(&health.test);
    match test.split_first() {
        Some((kind, _)) if kind == "NONE" => return vec!["--no-healthcheck".to_string()],
        Some((kind, command)) if (kind == "CMD" || kind == "CMD-SHELL") && !command.is_empty() => {
            tokens.push(format!("--health-cmd={}", double_quote(&command.join(" "))));
        }
        _ => {}
    }

    let durations = [
        ("--health-interval=", health.interval),
        ("--health-retries=", health.retries),
        ("--health-timeout=", health.timeout),
        ("--health-start-interval=", health.start_interval),
        ("--health-start-period=", health.start_period),
    ];
    for (flag, value) in durations {
        if value == 0 {
            continue;
        }
        if flag == "--health-retries=" {
            tokens.push(format!("{}{}", flag, value));
        } else {
            tokens.push(format!("{}{}", flag, go_duration(value)));
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test(parts: &[&str]) -> Option<Vec<String>> {
        Some(parts.iter().map(|p| p.to_string()).collect())
    }

    #[test]
    fn absent_health_is_silent() {
        assert!(healthcheck(None, None).is_empty());
    }

    #[test]
    fn command_without_zero_durations() {
        let health = HealthConfig {
            test: test(&["CMD", "curl", "-f", "http://x"]),
            ..Default::default()
        };
        assert_eq!(healthcheck(Some(&health), None), vec![r#"--health-cmd="curl -f http://x""#]);
    }

    #[test]
    fn disabled_stops_early() {
        let health = HealthConfig {
            test: test(&["NONE"]),
            interval: 30_000_000_000,
            ..Default::default()
        };
        assert_eq!(healthcheck(Some(&health), None), vec!["--no-healthcheck"]);
    }

    #[test]
    fn shell_command_and_durations_in_order() {
        let health = HealthConfig {
            test: test(&["CMD-SHELL", "pg_isready -U \"$USER\""]),
            interval: 30_000_000_000,
            timeout: 5_000_000_000,
            start_period: 90_000_000_000,
            retries: 3,
            ..Default::default()
        };
        assert_eq!(
            healthcheck(Some(&health), None),
            vec![
                r#"--health-cmd="pg_isready -U \"\$USER\"""#,
                "--health-interval=30s",
                "--health-retries=3",
                "--health-timeout=5s",
                "--health-start-period=1m30s",
            ]
        );
    }

    #[test]
    fn unknown_kind_has_no_command() {
        let health = HealthConfig {
            test: test(&["WHATEVER", "x"]),
            retries: 2,
            ..Default::default()
        };
        assert_eq!(healthcheck(Some(&health), None), vec!["--health-retries=2"]);
    }

    #[test]
    fn inherited_from_image_is_silent() {
        let health = HealthConfig {
            test: test(&["CMD", "true"]),
            ..Default::default()
        };
        assert!(healthcheck(Some(&health), Some(&health.clone())).is_empty());
    }
}
