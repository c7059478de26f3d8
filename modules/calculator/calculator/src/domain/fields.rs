/// Request field names, shared by validation messages and input counting.
pub struct CalcFields;

impl CalcFields {
    pub const NUM1: &'static str = "num1";
    pub const NUM2: &'static str = "num2";
    pub const VALUE: &'static str = "value";
    pub const POWER: &'static str = "power";
    pub const PRINCIPAL: &'static str = "principal";
    pub const ANNUAL_RATE: &'static str = "annual_rate";
    pub const YEARS: &'static str = "years";
    pub const RESULT: &'static str = "result";
}
