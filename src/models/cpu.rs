#[derive(Debug, Clone, PartialEq)]
pub struct Processor {
    pub model: Option<String>,
    pub cores: Option<u32>,
    pub threads: Option<u32>,
}

impl Default for Processor {
    fn default() -> Self {
        Self {
            model: None,
            cores: None,
            threads: None,
        }
    }
}
