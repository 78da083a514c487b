use super::r#trait::SelectionStrategy;
use crate::error::{FileStatsError, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use zbus::fdo::DBusProxy;
use zbus::names::BusName;
use zbus::Connection;

/// Имена файловых менеджеров на сессионной шине
const FILE_MANAGER_BUS_NAMES: &[&str] = &[
    "org.gnome.Nautilus",
    "org.xfce.FileManager",
    "org.kde.dolphin",
    "org.Nemo",
];

/// Заготовка под получение выделения у файлового менеджера через D-Bus.
///
/// Общего интерфейса для выделенных файлов у менеджеров нет, поэтому
/// стратегия только проверяет, кто из них присутствует на шине, и всегда
/// возвращает `None`. Место для будущей интеграции.
pub struct DbusStrategy {
    timeout: Duration,
}

impl DbusStrategy {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn running_file_managers(&self) -> Result<Vec<&'static str>> {
        let connection = Connection::session().await?;
        let proxy = DBusProxy::new(&connection).await?;

        let mut running = Vec::new();
        for name in FILE_MANAGER_BUS_NAMES {
            let bus_name = BusName::try_from(*name).map_err(zbus::Error::from)?;
            if proxy.name_has_owner(bus_name).await.unwrap_or(false) {
                running.push(*name);
            }
        }
        Ok(running)
    }
}

#[async_trait::async_trait]
impl SelectionStrategy for DbusStrategy {
    fn name(&self) -> &'static str {
        "dbus"
    }

    async fn detect(&self) -> Result<Option<PathBuf>> {
        let running = tokio::time::timeout(self.timeout, self.running_file_managers())
            .await
            .map_err(|_| FileStatsError::Timeout {
                tool: "D-Bus".to_string(),
                millis: self.timeout.as_millis(),
            })??;

        debug!("Файловые менеджеры на шине: {:?}", running);
        Ok(None)
    }
}
