#[derive(Debug, Clone, PartialEq)]
pub struct NetworkCard {
    pub model: Option<String>,
    pub name: Option<String>,
}

impl Default for NetworkCard {
    fn default() -> Self {
        Self {
            model: None,
            name: None,
        }
    }
}
