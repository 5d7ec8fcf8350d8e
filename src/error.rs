use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InputFileNotFound(String),
    InputPathIsNotAFile(String),
    NoReadPermissionForInputFile(String),
    UnableToOpenInputFileForReading(String, std::io::Error),
    ImageDecodingFailed(String, image::ImageError),
    UnexpectedChannelCount(usize),
    ColorChannelOutOfRange(u16),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToWriteContentTypes,
    FailedToWritePackageRelationships,
    FailedToWriteWorkbook,
    FailedToWriteStylesheet,
    FailedToWriteWorksheet,
    FailedToFinishPackage,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputFileNotFound(path) => {
                write!(f, "Input file '{}' not found", path)
            }
            Self::InputPathIsNotAFile(path) => {
                write!(f, "Input path '{}' is not a regular file", path)
            }
            Self::NoReadPermissionForInputFile(path) => {
                write!(
                    f,
                    "Unable open file '{}' for reading. Permission denied.",
                    path
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::ImageDecodingFailed(path, error) => {
                write!(f, "File '{}' could not be decoded as an image: {}", path, error)
            }
            Self::UnexpectedChannelCount(count) => {
                write!(
                    f,
                    "Incomplete pixel read. Expected 3 color channels, but got {}.",
                    count
                )
            }
            Self::ColorChannelOutOfRange(value) => {
                write!(
                    f,
                    "Color channel value {} is outside the valid range of 0 to 255",
                    value
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToWriteContentTypes => {
                write!(f, "Failed to write content types part")
            }
            Self::FailedToWritePackageRelationships => {
                write!(f, "Failed to write package relationships part")
            }
            Self::FailedToWriteWorkbook => write!(f, "Failed to write workbook part"),
            Self::FailedToWriteStylesheet => write!(f, "Failed to write stylesheet part"),
            Self::FailedToWriteWorksheet => write!(f, "Failed to write worksheet part"),
            Self::FailedToFinishPackage => {
                write!(f, "Failed to finish writing spreadsheet package")
            }
        }
    }
}

impl std::error::Error for Error {}
