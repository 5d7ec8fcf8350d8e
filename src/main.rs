use std::env::args_os;
use std::process;

use pixelsheet::{convert_image_to_spreadsheet, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match convert_image_to_spreadsheet(&arguments) {
        Ok(output_path) => println!("Conversion successful: {}", output_path.display()),
        Err(e) => {
            eprintln!("Conversion failed because of: {}", e);
            process::exit(1);
        }
    }
}
