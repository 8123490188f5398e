//! WMO weather code to display glyph.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

/// Returned for codes outside every group.
pub const NOT_FOUND: &str = "NOT FOUND";

/// Ordered (code group, glyph) pairs. Groups must be pairwise disjoint.
#[derive(Debug, Clone, Copy)]
pub struct WeatherCodeTable {
    groups: &'static [(&'static [i32], &'static str)],
}

/// Glyphs used by the widget.
pub static WMO_ICONS: WeatherCodeTable = WeatherCodeTable {
    groups: &[
        (&[0], "☀"),
        (&[1], "🌤"),
        (&[2], "⛅️"),
        (&[3], "☁️"),
        (&[45, 48], "🌫"),
        (&[51, 56, 61, 66, 80], "🌦"),
        (&[53, 55, 63, 65, 57, 67, 81, 82], "🌧"),
        (&[71, 73, 75, 77, 85, 86], "🌨"),
        (&[95], "🌩"),
        (&[96, 99], "⛈"),
    ],
};

/// A code that appears in two groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub code: i32,
    pub first_group: usize,
    pub second_group: usize,
}

impl WeatherCodeTable {
    pub const fn new(groups: &'static [(&'static [i32], &'static str)]) -> Self {
        Self { groups }
    }

    /// Glyph for `code`, or `None` if no group contains it.
    pub fn lookup(&self, code: i32) -> Option<&'static str> {
        self.groups
            .iter()
            .find(|(codes, _)| codes.contains(&code))
            .map(|(_, glyph)| *glyph)
    }

    /// Glyph for `code`, or [`NOT_FOUND`].
    pub fn glyph(&self, code: i32) -> &'static str {
        match self.lookup(code) {
            Some(glyph) => glyph,
            None => {
                tracing::debug!("No glyph for weather code {}", code);
                NOT_FOUND
            }
        }
    }

    pub fn check_disjoint(&self) -> Result<(), Overlap> {
        for (i, (codes, _)) in self.groups.iter().enumerate() {
            for (j, (later, _)) in self.groups.iter().enumerate().skip(i + 1) {
                if let Some(code) = codes.iter().find(|c| later.contains(*c)) {
                    return Err(Overlap {
                        code: *code,
                        first_group: i,
                        second_group: j,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.groups.iter().flat_map(|(codes, _)| codes.iter().copied())
    }
}

/// Classify with the widget's table.
pub fn weather_icon(code: i32) -> &'static str {
    WMO_ICONS.glyph(code)
}
