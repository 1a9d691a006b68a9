#[derive(Debug, Clone, PartialEq)]
pub struct Fan {
    pub name: Option<String>,
}
