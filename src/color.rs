use crate::error::Error;
use crate::Result;

const CHANNEL_MAX: u16 = 255;
const CHANNELS_PER_PIXEL: usize = 3;

/// An RGB color with 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RGBColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RGBColor {
    /// Validates that every channel is within 0 to 255.
    pub fn new(red: u16, green: u16, blue: u16) -> Result<Self> {
        for channel in [red, green, blue] {
            if channel > CHANNEL_MAX {
                return Err(Error::ColorChannelOutOfRange(channel));
            }
        }
        Ok(RGBColor {
            red: red as u8,
            green: green as u8,
            blue: blue as u8,
        })
    }

    /// Builds a color from raw decoded pixel data. The pixel must consist of
    /// exactly 3 channels.
    pub fn from_channels(channels: &[u8]) -> Result<Self> {
        if channels.len() != CHANNELS_PER_PIXEL {
            return Err(Error::UnexpectedChannelCount(channels.len()));
        }
        Self::new(
            channels[0].into(),
            channels[1].into(),
            channels[2].into(),
        )
    }

    /// Canonical textual form: '#' followed by 6 lowercase hex digits,
    /// 2 zero-padded digits per channel.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// The 6 hex digits of the canonical form without the leading marker.
    pub fn hex_digits(&self) -> String {
        let mut hex = self.hex();
        hex.remove(0);
        hex
    }
}

#[cfg(test)]
mod test {
    use super::RGBColor;
    use crate::error::Error;
    use proptest::prelude::*;

    #[test]
    fn encode_magenta_ish_color() {
        let color = RGBColor::new(255, 0, 128).expect("color must be valid");
        assert_eq!(color.hex(), "#ff0080");
    }

    #[test]
    fn encode_black() {
        let color = RGBColor::new(0, 0, 0).expect("color must be valid");
        assert_eq!(color.hex(), "#000000");
    }

    #[test]
    fn encode_white() {
        let color = RGBColor::new(255, 255, 255).expect("color must be valid");
        assert_eq!(color.hex(), "#ffffff");
    }

    #[test]
    fn hex_digits_strip_the_marker() {
        let color = RGBColor::new(18, 52, 86).expect("color must be valid");
        assert_eq!(color.hex_digits(), "123456");
    }

    #[test]
    fn reject_out_of_range_red_channel() {
        let result = RGBColor::new(256, 0, 0);
        match result {
            Err(Error::ColorChannelOutOfRange(value)) => assert_eq!(value, 256),
            _ => panic!("Out of range channel not detected"),
        }
    }

    #[test]
    fn reject_out_of_range_blue_channel() {
        let result = RGBColor::new(0, 0, 1000);
        match result {
            Err(Error::ColorChannelOutOfRange(value)) => assert_eq!(value, 1000),
            _ => panic!("Out of range channel not detected"),
        }
    }

    #[test]
    fn reject_too_few_channels() {
        let result = RGBColor::from_channels(&[128, 17]);
        match result {
            Err(Error::UnexpectedChannelCount(count)) => assert_eq!(count, 2),
            _ => panic!("Wrong channel count not detected"),
        }
    }

    #[test]
    fn reject_too_many_channels() {
        let result = RGBColor::from_channels(&[128, 17, 3, 255]);
        match result {
            Err(Error::UnexpectedChannelCount(count)) => assert_eq!(count, 4),
            _ => panic!("Wrong channel count not detected"),
        }
    }

    #[test]
    fn build_color_from_three_channels() {
        let color = RGBColor::from_channels(&[1, 2, 3]).expect("pixel must be valid");
        assert_eq!(color.hex(), "#010203");
    }

    proptest! {
        #[test]
        fn hex_is_canonical_for_all_valid_channels(
            red in 0u16..=255,
            green in 0u16..=255,
            blue in 0u16..=255,
        ) {
            let color = RGBColor::new(red, green, blue).expect("color must be valid");
            let hex = color.hex();
            prop_assert_eq!(hex.len(), 7);
            prop_assert!(hex.starts_with('#'));
            let red_hex = format!("{:02x}", red);
            let green_hex = format!("{:02x}", green);
            let blue_hex = format!("{:02x}", blue);
            prop_assert_eq!(&hex[1..3], red_hex.as_str());
            prop_assert_eq!(&hex[3..5], green_hex.as_str());
            prop_assert_eq!(&hex[5..7], blue_hex.as_str());
        }

        #[test]
        fn any_out_of_range_channel_is_rejected(
            red in 256u16..,
            green in 0u16..=255,
            blue in 0u16..=255,
        ) {
            prop_assert!(RGBColor::new(red, green, blue).is_err());
            prop_assert!(RGBColor::new(green, red, blue).is_err());
            prop_assert!(RGBColor::new(green, blue, red).is_err());
        }
    }
}
