use std::path::Path;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::error::{InstallerError, InstallerResult};
use crate::core::launcher::{discover, LauncherVariant};

/// Answer from a [`VariantSelector`] when several launchers are installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Chosen(LauncherVariant),
    Cancelled,
}

/// Decides which launcher variant to target.
#[async_trait]
pub trait VariantSelector: Send + Sync {
    /// Variant fixed up front (e.g. `--launcher`); skips discovery entirely.
    fn preselected(&self) -> Option<LauncherVariant> {
        None
    }

    /// Pick one of `candidates` (always two or more).
    async fn choose(&self, candidates: &[LauncherVariant]) -> InstallerResult<Selection>;
}

/// Non-interactive selector: uses the `--launcher` flag or refuses to guess.
#[derive(Debug, Clone, Default)]
pub struct FlagSelector {
    launcher: Option<LauncherVariant>,
}

impl FlagSelector {
    pub fn new(launcher: Option<LauncherVariant>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl VariantSelector for FlagSelector {
    fn preselected(&self) -> Option<LauncherVariant> {
        self.launcher
    }

    async fn choose(&self, candidates: &[LauncherVariant]) -> InstallerResult<Selection> {
        Err(InstallerError::AmbiguousLauncher {
            found: candidates.to_vec(),
        })
    }
}

const MAX_PROMPT_ATTEMPTS: usize = 3;

/// Interactive selector: lists the candidates on stderr and reads a number.
///
/// An empty line, `q`, end of input or too many invalid answers cancel.
pub struct PromptSelector<R> {
    input: Mutex<R>,
    launcher: Option<LauncherVariant>,
}

impl PromptSelector<BufReader<Stdin>> {
    pub fn stdin(launcher: Option<LauncherVariant>) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), launcher)
    }
}

impl<R> PromptSelector<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(input: R, launcher: Option<LauncherVariant>) -> Self {
        Self {
            input: Mutex::new(input),
            launcher,
        }
    }
}

#[async_trait]
impl<R> VariantSelector for PromptSelector<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    fn preselected(&self) -> Option<LauncherVariant> {
        self.launcher
    }

    async fn choose(&self, candidates: &[LauncherVariant]) -> InstallerResult<Selection> {
        let mut input = self.input.lock().await;

        eprintln!("Multiple launcher installations were found. Which one should get the profile?");
        for (index, variant) in candidates.iter().enumerate() {
            eprintln!("  {}) {} [{}]", index + 1, variant.label(), variant.cli_name());
        }

        for _ in 0..MAX_PROMPT_ATTEMPTS {
            eprint!("Select 1-{} (empty to cancel): ", candidates.len());

            let mut line = String::new();
            let read = input.read_line(&mut line).await?;
            let answer = line.trim();
            if read == 0 || answer.is_empty() || answer.eq_ignore_ascii_case("q") {
                return Ok(Selection::Cancelled);
            }

            if let Some(variant) = parse_answer(answer, candidates) {
                return Ok(Selection::Chosen(variant));
            }
            eprintln!("'{}' is not one of the options.", answer);
        }

        Ok(Selection::Cancelled)
    }
}

/// Accepts a 1-based index or a `--launcher` name.
fn parse_answer(answer: &str, candidates: &[LauncherVariant]) -> Option<LauncherVariant> {
    if let Ok(index) = answer.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| candidates.get(i))
            .copied();
    }
    answer
        .parse::<LauncherVariant>()
        .ok()
        .filter(|variant| candidates.contains(variant))
}

/// Pick the launcher variant to register the profile with.
///
/// An explicit choice wins; otherwise zero discovered variants is an error,
/// one is used as is and several are handed to `selector`.
pub async fn resolve_variant(
    base_dir: &Path,
    selector: &dyn VariantSelector,
) -> InstallerResult<LauncherVariant> {
    if let Some(variant) = selector.preselected() {
        debug!("Using preselected launcher variant {}", variant);
        return Ok(variant);
    }

    let found = discover(base_dir);
    let variant = match found.as_slice() {
        [] => return Err(InstallerError::NoCompatibleLauncher(base_dir.to_path_buf())),
        [only] => *only,
        candidates => match selector.choose(candidates).await? {
            Selection::Chosen(variant) => variant,
            Selection::Cancelled => return Err(InstallerError::SelectionCancelled),
        },
    };

    info!("Targeting launcher variant {}", variant);
    Ok(variant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher_dir(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            std::fs::write(dir.path().join(file), "{}").unwrap();
        }
        dir
    }

    const BOTH: [&str; 2] = [
        "launcher_profiles.json",
        "launcher_profiles_microsoft_store.json",
    ];

    #[tokio::test]
    async fn no_variants_is_an_error() {
        let dir = launcher_dir(&[]);
        let err = resolve_variant(dir.path(), &FlagSelector::default())
            .await
            .unwrap_err();
        assert!(matches!(err, InstallerError::NoCompatibleLauncher(_)));
    }

    #[tokio::test]
    async fn single_variant_is_auto_selected() {
        let dir = launcher_dir(&["launcher_profiles.json"]);
        let variant = resolve_variant(dir.path(), &FlagSelector::default())
            .await
            .unwrap();
        assert_eq!(variant, LauncherVariant::Standard);
    }

    #[tokio::test]
    async fn several_variants_without_flag_are_ambiguous() {
        let dir = launcher_dir(&BOTH);
        let err = resolve_variant(dir.path(), &FlagSelector::default())
            .await
            .unwrap_err();
        assert!(matches!(err, InstallerError::AmbiguousLauncher { ref found } if found.len() == 2));
    }

    #[tokio::test]
    async fn flag_overrides_discovery() {
        let dir = launcher_dir(&BOTH);
        let selector = FlagSelector::new(Some(LauncherVariant::MicrosoftStore));
        let variant = resolve_variant(dir.path(), &selector).await.unwrap();
        assert_eq!(variant, LauncherVariant::MicrosoftStore);
    }

    #[tokio::test]
    async fn prompt_accepts_index() {
        let dir = launcher_dir(&BOTH);
        let selector = PromptSelector::new(&b"2\n"[..], None);
        let variant = resolve_variant(dir.path(), &selector).await.unwrap();
        assert_eq!(variant, LauncherVariant::MicrosoftStore);
    }

    #[tokio::test]
    async fn prompt_retries_after_invalid_answer() {
        let dir = launcher_dir(&BOTH);
        let selector = PromptSelector::new(&b"7\nwin32\n"[..], None);
        let variant = resolve_variant(dir.path(), &selector).await.unwrap();
        assert_eq!(variant, LauncherVariant::Standard);
    }

    #[tokio::test]
    async fn prompt_empty_answer_cancels() {
        let dir = launcher_dir(&BOTH);
        let selector = PromptSelector::new(&b"\n"[..], None);
        let err = resolve_variant(dir.path(), &selector).await.unwrap_err();
        assert!(matches!(err, InstallerError::SelectionCancelled));
    }

    #[tokio::test]
    async fn prompt_end_of_input_cancels() {
        let selector = PromptSelector::new(&b""[..], None);
        let selection = selector.choose(&LauncherVariant::ALL).await.unwrap();
        assert_eq!(selection, Selection::Cancelled);
    }
}
