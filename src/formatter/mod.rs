pub mod rdata;
pub mod reverse;
pub mod zone_data;
