use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::info;

use crate::config::cmd::CmdArgs;
use crate::config::RenderOptions;
use crate::container::source::{read_image_file, DockerCli, InspectSource, Snapshot};
use crate::reconstruct::reconstruct;

mod config;
mod container;
mod error;
mod init;
mod reconstruct;
mod util;

fn main() -> ExitCode {
    let args = CmdArgs::parse();
    init::init();
    match run(&args) {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_failed(err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CmdArgs) -> Result<String> {
    let target = config::target(args)?;
    let options = RenderOptions::from(args);
    let cli = DockerCli::new(&args.docker);
    let line = if args.stdin {
        info!("Reading container snapshot from stdin");
        let source = Snapshot::from_reader(io::stdin().lock(), args.image_file.as_deref(), cli)?;
        reconstruct(&source, target, &options)?
    } else if let Some(path) = &args.image_file {
        let source = Snapshot::new(cli.container(target)?, Some(read_image_file(path)?), cli);
        reconstruct(&source, target, &options)?
    } else {
        reconstruct(&cli, target, &options)?
    };
    Ok(line)
}

fn print_failed(err: anyhow::Error) {
    eprintln!("{} {}", "Error:".red(), err);
}
