use leptos::prelude::*;
use mytasks_frontend::{App, logger};

// lol_alloc keeps the bundle small
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();
    logger::init();
    tracing::info!("mounting MyTasks");
    mount_to_body(App);
}
