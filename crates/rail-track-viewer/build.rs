fn main() {
    // Generates the `build` module used to log version info at startup
    shadow_rs::ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
