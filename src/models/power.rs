#[derive(Debug, Clone, PartialEq)]
pub struct PowerSupply {
    pub capacity_watts: Option<u32>,
}
