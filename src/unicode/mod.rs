pub mod percent_encode;
