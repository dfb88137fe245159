use std::{error::Error, fmt::Display, path::PathBuf, process};

use crate::dir::CustodyDirectory;

#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    DatadirPath(CustodyDirectory),
}

/// Parse command-line arguments, `args[0]` being the program name.
pub fn parse_args(args: Vec<String>, version: impl Display) -> Result<Vec<Arg>, Box<dyn Error>> {
    let mut res = Vec::new();

    if args.len() > 1 && (args[1] == "--version" || args[1] == "-v") {
        eprintln!("{}", version);
        process::exit(0);
    }

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        eprintln!(
            r#"
Usage: custody-gui [OPTIONS]

Options:
    --datadir <PATH>    Path of custody datadir
    -v, --version       Display custody-gui version
    -h, --help          Print help
        "#
        );
        process::exit(0);
    }

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--datadir" {
            match args.next() {
                Some(a) => res.push(Arg::DatadirPath(CustodyDirectory::new(PathBuf::from(a)))),
                None => return Err("missing arg to --datadir".into()),
            }
        } else {
            return Err(format!("unknown argument '{}'", arg).into());
        }
    }

    Ok(res)
}

/// Directory picked by the arguments, or the default one.
pub fn datadir(args: &[Arg]) -> Result<CustodyDirectory, Box<dyn Error>> {
    match args {
        [] => CustodyDirectory::new_default(),
        [Arg::DatadirPath(datadir_path)] => Ok(datadir_path.clone()),
        _ => Err("Unknown args combination".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION: &str = "0.1.0";

    fn args(line: &str) -> Vec<String> {
        line.split(' ').map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert!(parse_args(args("app --meth"), VERSION).is_err());
        assert!(parse_args(args("app --datadir"), VERSION).is_err());
        assert_eq!(Some(vec![]), parse_args(args("app"), VERSION).ok());

        let parsed = parse_args(args("app --datadir hello"), VERSION).unwrap();
        assert_eq!(
            parsed,
            vec![Arg::DatadirPath(CustodyDirectory::new(PathBuf::from("hello")))]
        );
        assert_eq!(
            datadir(&parsed).unwrap(),
            CustodyDirectory::new(PathBuf::from("hello"))
        );

        let twice = parse_args(args("app --datadir a --datadir b"), VERSION).unwrap();
        assert!(datadir(&twice).is_err());
    }
}
