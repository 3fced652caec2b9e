#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = traithull_io::parse_trait_matrix(input);
        let _ = traithull_io::parse_plot_matrix(input);
    }
});
