use crate::config::cmd::CmdArgs;
use crate::error::{Result, RunlikeError};

pub mod cmd;

/// 最终输出的拼接方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    #[default]
    Space,
    /// 每个参数一行，以 `\` 续行
    Pretty,
}

impl Separator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::Pretty => " \\\n\t",
        }
    }
}

/// 控制哪些参数参与重建以及如何输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub omit_name: bool,
    pub include_labels: bool,
    pub separator: Separator,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            omit_name: false,
            include_labels: true,
            separator: Separator::Space,
        }
    }
}

impl From<&CmdArgs> for RenderOptions {
    fn from(args: &CmdArgs) -> Self {
        RenderOptions {
            omit_name: args.no_name,
            include_labels: !args.no_labels,
            separator: if args.pretty { Separator::Pretty } else { Separator::Space },
        }
    }
}

/// 检查要重建的目标是否明确
pub fn target(args: &CmdArgs) -> Result<&str> {
    match (&args.container, args.stdin) {
        (Some(_), true) => Err(RunlikeError::usage("provide either [container] or --stdin, not both")),
        (Some(container), false) => Ok(container.as_str()),
        (None, true) => Ok(""),
        (None, false) => Err(RunlikeError::usage("no arguments, provide [container] or --stdin")),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn options_from_args() {
        let args = CmdArgs::parse_from(["runlike", "--pretty", "--no-labels", "web"]);
        let options = RenderOptions::from(&args);
        assert_eq!(options.separator, Separator::Pretty);
        assert!(!options.include_labels);
        assert!(!options.omit_name);
    }

    #[test]
    fn target_is_required_once() {
        let args = CmdArgs::parse_from(["runlike", "web"]);
        assert_eq!(target(&args).ok(), Some("web"));

        let args = CmdArgs::parse_from(["runlike", "--stdin"]);
        assert_eq!(target(&args).ok(), Some(""));

        let args = CmdArgs::parse_from(["runlike"]);
        assert!(matches!(target(&args), Err(RunlikeError::Usage(_))));

        let args = CmdArgs::parse_from(["runlike", "--stdin", "web"]);
        assert!(matches!(target(&args), Err(RunlikeError::Usage(_))));
    }
}
