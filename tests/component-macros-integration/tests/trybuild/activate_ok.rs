use component_macros::Activate;
use di_abstractions::Options;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Default, Serialize, Deserialize)]
struct Settings {
    retries: u32,
}

struct Clock;

#[derive(Activate)]
struct Named {
    clock: Arc<Clock>,
    fallback: Option<Arc<Clock>>,
    settings: Options<Settings>,
    #[activate(default)]
    counter: u64,
}

#[derive(Activate)]
struct Tuple(Vec<Arc<Clock>>, u8);

#[derive(Activate)]
struct Unit;

fn main() {
    fn assert_activate<T: di_abstractions::Activate>() {}
    assert_activate::<Named>();
    assert_activate::<Tuple>();
    assert_activate::<Unit>();
}
