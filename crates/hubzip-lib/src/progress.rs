use std::io::{self, Write};

/// Formatting settings for the progress line. The thousands separator is
/// configurable rather than taken from the platform locale.
#[derive(Debug, Clone)]
pub struct ProgressFormat {
    pub thousands_separator: char,
}

impl Default for ProgressFormat {
    fn default() -> Self {
        Self {
            thousands_separator: ',',
        }
    }
}

/// Groups the digits of `value` in threes, e.g. `2048` becomes `2,048`.
pub fn format_grouped(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// A single status line reporting bytes downloaded against the expected
/// total. The line is rewritten in place with a carriage return instead of
/// printing one line per chunk.
#[derive(Debug)]
pub struct ProgressLine {
    total: u64,
    format: ProgressFormat,
}

impl ProgressLine {
    pub fn new(total: u64, format: ProgressFormat) -> Self {
        Self { total, format }
    }

    /// The amount shown on the line. The final chunk may overshoot the
    /// nominal total due to fixed chunk sizing, so the displayed amount is
    /// clamped to the expected total.
    fn displayed(&self, downloaded: u64) -> u64 {
        downloaded.min(self.total)
    }

    /// Rewrites the status line on `out`. The binary binds this to stdout.
    pub fn update(&self, out: &mut (impl Write + ?Sized), downloaded: u64) -> io::Result<()> {
        let separator = self.format.thousands_separator;
        write!(
            out,
            "\r{} {} bytes.",
            format_grouped(self.displayed(downloaded), separator),
            format_grouped(self.total, separator),
        )?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(format_grouped(0, ','), "0");
        assert_eq!(format_grouped(999, ','), "999");
        assert_eq!(format_grouped(1000, ','), "1,000");
        assert_eq!(format_grouped(2048, ','), "2,048");
        assert_eq!(format_grouped(1_234_567, ','), "1,234,567");
    }

    #[test]
    fn separator_is_configurable() {
        assert_eq!(format_grouped(1_234_567, '.'), "1.234.567");
    }

    #[test]
    fn displayed_amount_is_clamped_to_total() {
        let line = ProgressLine::new(2048, ProgressFormat::default());
        assert_eq!(line.displayed(1024), 1024);
        assert_eq!(line.displayed(2048), 2048);
        // Overshoot from a fixed-size final chunk.
        assert_eq!(line.displayed(3072), 2048);
    }

    #[test]
    fn final_update_reads_the_exact_total_even_when_the_last_chunk_overshoots() {
        let line = ProgressLine::new(2048, ProgressFormat::default());
        let mut out = Vec::new();

        line.update(&mut out, 1024).unwrap();
        line.update(&mut out, 3072).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert_eq!(written, "\r1,024 2,048 bytes.\r2,048 2,048 bytes.");
    }
}
