use sysinfo::{ProcessRefreshKind, RefreshKind, System};

/// Process names (lowercase, without extension) the official launcher runs under.
const LAUNCHER_PROCESS_NAMES: [&str; 3] = ["minecraftlauncher", "minecraft-launcher", "minecraft"];

/// Whether the launcher appears to be running right now.
///
/// A running launcher rewrites its profiles file on exit and may drop our entry.
/// Blocking; only the process table is refreshed.
pub fn is_launcher_running() -> bool {
    let system =
        System::new_with_specifics(RefreshKind::new().with_processes(ProcessRefreshKind::new()));
    system
        .processes()
        .values()
        .any(|process| is_launcher_process_name(&process.name().to_string_lossy()))
}

fn is_launcher_process_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    let stem = lower.strip_suffix(".exe").unwrap_or(&lower);
    LAUNCHER_PROCESS_NAMES.contains(&stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_launcher_executables() {
        assert!(is_launcher_process_name("MinecraftLauncher.exe"));
        assert!(is_launcher_process_name("minecraft-launcher"));
        assert!(is_launcher_process_name("Minecraft.exe"));
    }

    #[test]
    fn ignores_unrelated_processes() {
        assert!(!is_launcher_process_name("java"));
        assert!(!is_launcher_process_name("minecraft-server"));
    }
}
