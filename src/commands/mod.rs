pub mod badges;
pub mod sign;
