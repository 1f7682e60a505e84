pub mod mollie;
