use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    name = "runlike",
    about = "Prints the command line version of a Docker container",
    version
)]
pub struct CmdArgs {
    /// Container name or ID to inspect
    pub container: Option<String>,

    /// Do not include container name in output
    #[clap(long)]
    pub no_name: bool,

    /// Pretty-print the command
    #[clap(long, short)]
    pub pretty: bool,

    /// Accept `docker inspect` output from STDIN
    #[clap(long, short)]
    pub stdin: bool,

    /// Do not emit --label flags
    #[clap(long)]
    pub no_labels: bool,

    /// [OPTION] `docker image inspect` output to diff against instead of querying docker
    #[clap(long, value_name = "PATH")]
    pub image_file: Option<PathBuf>,

    /// [OPTION] Docker executable used for inspection
    #[clap(long, value_name = "BIN", default_value = "docker")]
    pub docker: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flags() {
        let args = CmdArgs::parse_from(["runlike", "-p", "--no-name", "--no-labels", "web"]);
        assert!(args.pretty);
        assert!(args.no_name);
        assert!(args.no_labels);
        assert!(!args.stdin);
        assert_eq!(args.container.as_deref(), Some("web"));
        assert_eq!(args.docker, "docker");

        let args = CmdArgs::parse_from(["runlike", "-s", "--image-file", "image.json"]);
        assert!(args.stdin);
        assert_eq!(args.image_file, Some(PathBuf::from("image.json")));
    }
}
