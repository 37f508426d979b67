// Integration tests

mod entitlement_test;
mod orders_test;
mod promo_test;
