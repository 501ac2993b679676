use super::r#trait::WindowBackend;
use crate::error::Result;
use crate::events::WindowInfo;
use tracing::info;

/// Эмуляция менеджера окон для режима сухого запуска
pub struct DryRunBackend;

impl WindowBackend for DryRunBackend {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    fn probe(&self) -> Result<()> {
        Ok(())
    }

    fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        Ok(vec![
            WindowInfo::new("dry-1", "Terminal - dry_run").with_class("DryRun"),
            WindowInfo::new("dry-2", "Browser - dry_run").with_class("DryRun"),
            WindowInfo::new("dry-3", "Editor - dry_run").with_class("DryRun"),
        ])
    }

    fn focus(&self, window: &WindowInfo) -> Result<()> {
        info!("[DRY RUN] Фокус на окно {}", window);
        Ok(())
    }
}
