//! Nested output capture

/// A stack of capture regions over a final output buffer
///
/// While a region is open, everything written lands in the innermost region.
/// With no region open, writes go to the final output.
#[derive(Debug, Default)]
pub struct OutputCapture {
    regions: Vec<String>,
    output: String,
}

impl OutputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start diverting writes into a fresh buffer
    pub fn begin(&mut self) {
        self.regions.push(String::new());
    }

    /// Stop the innermost diversion and return what it captured
    pub fn end(&mut self) -> Option<String> {
        self.regions.pop()
    }

    /// Number of open regions
    pub fn depth(&self) -> usize {
        self.regions.len()
    }

    pub fn is_capturing(&self) -> bool {
        !self.regions.is_empty()
    }

    /// Write to the innermost region, or to the final output
    pub fn write(&mut self, text: &str) {
        match self.regions.last_mut() {
            Some(region) => region.push_str(text),
            None => self.output.push_str(text),
        }
    }

    /// Drop every open region
    pub fn discard(&mut self) {
        self.regions.clear();
    }

    /// Consume the capture and return the final output
    pub fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_without_region_goes_to_output() {
        let mut capture = OutputCapture::new();
        capture.write("a");
        capture.write("b");
        assert_eq!(capture.finish(), "ab");
    }

    #[test]
    fn test_nested_regions_restore_previous_target() {
        let mut capture = OutputCapture::new();
        capture.write("<");
        capture.begin();
        capture.write("outer ");
        capture.begin();
        capture.write("inner");
        assert_eq!(capture.depth(), 2);

        let inner = capture.end().unwrap();
        assert_eq!(inner, "inner");
        capture.write("!");
        let outer = capture.end().unwrap();
        assert_eq!(outer, "outer !");
        assert!(!capture.is_capturing());

        capture.write(">");
        assert_eq!(capture.finish(), "<>");
    }

    #[test]
    fn test_end_without_region() {
        let mut capture = OutputCapture::new();
        assert_eq!(capture.end(), None);
    }
}
