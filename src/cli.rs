use crate::{Arguments, DEFAULT_MAX_IMAGE_HEIGHT, DEFAULT_MAX_IMAGE_WIDTH};
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, error::ErrorKind,
    value_parser, Arg, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    /// Parses the given argument list. On a usage error the message is
    /// printed and the process exits with code 1; help and version requests
    /// exit with code 0.
    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| Self::exit_on_parse_error(e));
        Self::extract_arguments(&matches)
    }

    /// Like [`parse`](Self::parse) but reports usage errors to the caller.
    pub fn try_parse<I, T>(&mut self, itr: I) -> Result<Arguments, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.try_get_matches_from_mut(itr)?;
        Ok(Self::extract_arguments(&matches))
    }

    fn exit_on_parse_error(error: clap::Error) -> ! {
        if matches!(
            error.kind(),
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
        ) {
            error.exit();
        }
        let _ = error.print();
        process::exit(1);
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_max_width_argument(command);
        let command = Self::register_max_height_argument(command);
        Self::register_output_directory_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_max_width_argument(command: Command) -> Command {
        command.arg(Self::create_max_width_argument())
    }

    fn register_max_height_argument(command: Command) -> Command {
        command.arg(Self::create_max_height_argument())
    }

    fn register_output_directory_argument(command: Command) -> Command {
        command.arg(Self::create_output_directory_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to input image file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_max_width_argument() -> Arg {
        arg!(max_width: -w --max_width <CELLS> "Maximum number of output columns")
            .default_value(DEFAULT_MAX_IMAGE_WIDTH.to_string())
            .value_parser(value_parser!(u32).range(1..))
    }

    fn create_max_height_argument() -> Arg {
        arg!(max_height: -H --max_height <CELLS> "Maximum number of output rows")
            .default_value(DEFAULT_MAX_IMAGE_HEIGHT.to_string())
            .value_parser(value_parser!(u32).range(1..))
    }

    fn create_output_directory_argument() -> Arg {
        arg!(output_directory: -o --output_directory <DIRECTORY> "Directory the spreadsheet is written to")
            .default_value(".")
            .value_parser(value_parser!(PathBuf))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            max_width: Self::extract_max_width_argument(matches),
            max_height: Self::extract_max_height_argument(matches),
            output_directory: Self::extract_output_directory_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_max_width_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("max_width")
            .expect("Max width must be provided, but was unset.")
            .to_owned()
    }

    fn extract_max_height_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("max_height")
            .expect("Max height must be provided, but was unset.")
            .to_owned()
    }

    fn extract_output_directory_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_directory")
            .expect("Output directory must be provided, but was unset.")
            .clone()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
