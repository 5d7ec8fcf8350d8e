use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub use cli::CLIParser;
pub use color::RGBColor;
pub use error::Error;
pub use raster::SourceImage;
pub use sheet::Worksheet;

mod cli;
mod color;
mod error;
mod logger;
mod raster;
pub mod sheet;

pub type Result<T> = std::result::Result<T, error::Error>;

/// Images are downscaled to fit within this many cells per dimension, so
/// that an input does not generate an unbounded number of spreadsheet cells.
pub const DEFAULT_MAX_IMAGE_WIDTH: u32 = 200;
pub const DEFAULT_MAX_IMAGE_HEIGHT: u32 = 200;

/// Cell sizing that renders approximately square pixels in LibreOffice Calc.
/// Row heights and column widths use different units in the spreadsheet
/// format, hence the factor of 7 between them.
pub const DEFAULT_ROW_HEIGHT: f32 = 7.0;
pub const DEFAULT_COLUMN_WIDTH: f32 = DEFAULT_ROW_HEIGHT / 7.0;

const SPREADSHEET_EXTENSION: &str = "xlsx";

pub struct Arguments {
    input_file: PathBuf,
    max_width: u32,
    max_height: u32,
    output_directory: PathBuf,
}

/// Bounds and cell sizing of a conversion run.
#[derive(Clone, Copy, Debug)]
pub struct ConversionOptions {
    pub max_width: u32,
    pub max_height: u32,
    pub row_height: f32,
    pub column_width: f32,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            max_width: DEFAULT_MAX_IMAGE_WIDTH,
            max_height: DEFAULT_MAX_IMAGE_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl From<&Arguments> for ConversionOptions {
    fn from(value: &Arguments) -> Self {
        ConversionOptions {
            max_width: value.max_width,
            max_height: value.max_height,
            ..Default::default()
        }
    }
}

fn ensure_input_file_is_readable(file_path: &Path) -> Result<()> {
    let path_string = file_path.display().to_string();
    if !file_path.exists() {
        return Err(Error::InputFileNotFound(path_string));
    }
    if !file_path.is_file() {
        return Err(Error::InputPathIsNotAFile(path_string));
    }
    if let Err(error) = File::open(file_path) {
        return Err(match error.kind() {
            ErrorKind::PermissionDenied => Error::NoReadPermissionForInputFile(path_string),
            _ => Error::UnableToOpenInputFileForReading(path_string, error),
        });
    }
    Ok(())
}

/// Derives the sheet title from the file name by stripping the final
/// extension. A name without an extension is kept whole, and a name that
/// strips to nothing (such as a dotfile) falls back to the full name.
fn sheet_title_of(file_path: &Path) -> String {
    let file_name = file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_owned(),
        _ => file_name,
    }
}

/// Converts the image given on the command line into a spreadsheet in which
/// each cell is colored like one (possibly downscaled) source pixel.
/// Returns the path of the written spreadsheet.
pub fn convert_image_to_spreadsheet(arguments: &Arguments) -> Result<PathBuf> {
    let options = ConversionOptions::from(arguments);
    run_conversion(
        &arguments.input_file,
        &arguments.output_directory,
        &options,
    )
}

pub fn run_conversion(
    input_file: &Path,
    output_directory: &Path,
    options: &ConversionOptions,
) -> Result<PathBuf> {
    ensure_input_file_is_readable(input_file)?;
    let image = SourceImage::open(input_file)?;
    log::info!(
        "Decoded image '{}' with {}x{} pixels",
        input_file.display(),
        image.width(),
        image.height()
    );
    let image = image.thumbnail(options.max_width, options.max_height);
    let title = sheet_title_of(input_file);
    let sheet = build_worksheet(&image, &title, options)?;
    let output_path =
        output_directory.join(format!("{}.{}", title, SPREADSHEET_EXTENSION));
    sheet::xlsx::write_worksheet_to_file(&sheet, &output_path)?;
    log::info!(
        "Wrote {} cells to '{}'",
        sheet.cell_count(),
        output_path.display()
    );
    Ok(output_path)
}

fn build_worksheet(
    image: &SourceImage,
    title: &str,
    options: &ConversionOptions,
) -> Result<Worksheet> {
    let mut sheet = Worksheet::new(title, options.column_width, options.row_height);
    for y in 0..image.height() {
        for x in 0..image.width() {
            let color = RGBColor::from_channels(image.pixel_channels(x, y))?;
            sheet.set_cell_fill(x + 1, y + 1, color);
        }
    }
    Ok(sheet)
}
