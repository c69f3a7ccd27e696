//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        let template = Self::generate_template();

        match &self.output {
            Some(path) => {
                std::fs::write(path, template)
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                eprintln!("Configuration written to {}", path.display());
                eprintln!("Use it with: textanchor --config {} <COMMAND>", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(template.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }

    /// Commented configuration listing every default
    pub fn generate_template() -> &'static str {
        r#"# textanchor configuration
#
# Every key is optional; removed keys keep the defaults shown here.
# Offsets and lengths count Unicode characters.

[locator]
# Minimum trigram similarity for the unbounded fuzzy tier
# (0.75 places extracted chunks, 0.65 suits annotation recovery)
trigram_threshold = 0.75
# Confidence reported by the approximate position estimate
min_confidence = 0.3
# Trigram window stride as a fraction of the needle length
stride_percent = 0.1
# Characters inspected on each side of a match for context words
context_window_chars = 100
# Words of context reported on each side
context_words = 5
# Minimum edit similarity for the context-guided and chunk-bounded tiers
bounded_threshold = 0.75
# Confidence multiplier for context-guided matches
context_penalty = 0.95
# Confidence multiplier for trigram matches
fuzzy_penalty = 0.9
# Any similarity above this stops a scan
early_exit = 0.95
# Trigram windows scanned before the stride doubles
stride_doubling_after = 100
# Chunks searched on each side of the hinted chunk
chunk_radius = 2
# Context-guided search region as a multiple of the needle length
context_region_factor = 1.3
# Longest aligned span as a multiple of the needle length
bounded_span_factor = 1.2

[stitcher]
# Shortest overlap considered
min_overlap_length = 20
# Fraction of each segment searched for the overlap
max_overlap_percent = 0.8
# Minimum trigram similarity for a fuzzy overlap
overlap_threshold = 0.8
# Inserted between segments without an overlap
separator = "\n\n---\n\n"
# Fuzzy tier: length decrement, slide step, slide limit, longest window
fuzzy_length_step = 20
fuzzy_slide_step = 10
max_fuzzy_shift = 200
max_fuzzy_length = 2000
# Any similarity above this stops the fuzzy scan
early_exit = 0.95

[marker]
# Element name of generated markers
tag = "mark"
# Fuzzy thresholds for short and long literal texts
fuzzy_short_threshold = 0.9
fuzzy_long_threshold = 0.85
# Literal texts at least this long use the long threshold
long_needle_chars = 100
# Literal texts longer than this skip the fuzzy step
fuzzy_max_needle = 1000
# Words matched at each end of a literal by the last-resort anchor step
leading_words = 10

[output]
# Pretty print JSON output
pretty_json = true
# Print one line per seam to stderr after stitching
stitch_report = false
"#
    }
}
