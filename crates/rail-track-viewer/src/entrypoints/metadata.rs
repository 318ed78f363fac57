use shadow_rs::shadow;

shadow!(build);

/// Log version info through `tracing`.
#[allow(dead_code)] // Allow auto-generated code containing unused build metadata
pub fn log_version_info() {
    tracing::info!("{}", short_version_info());
    tracing::info!(
        "Build date: {} ({})",
        build::BUILD_TIME_2822,
        build::BUILD_RUST_CHANNEL
    );
}

#[allow(dead_code)] // Allow auto-generated code containing unused build metadata
pub fn short_version_info() -> String {
    format!(
        "{} {} ({}@{}{})",
        build::PROJECT_NAME,
        build::PKG_VERSION,
        build::BRANCH,
        build::SHORT_COMMIT,
        if build::GIT_CLEAN { "" } else { "+dirty" }
    )
}
