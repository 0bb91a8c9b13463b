// ── Device selection and simulated connect ──
//
// Picking a device never opens a connection; `connect` only describes
// what a real session would use.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::catalog::Catalog;
use crate::config::DeviceCredentials;
use crate::error::CoreError;
use crate::model::{DeviceType, NetworkDevice};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionMethod {
    #[default]
    Ssh,
    Snmp,
}

impl ConnectionMethod {
    pub fn default_port(self) -> u16 {
        match self {
            Self::Ssh => 22,
            Self::Snmp => 161,
        }
    }
}

/// What a real connection attempt would use. No I/O is performed.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionPlan {
    pub device: NetworkDevice,
    pub method: ConnectionMethod,
    pub port: u16,
    pub username: String,
    #[serde(skip)]
    password: SecretString,
}

impl ConnectionPlan {
    pub fn has_password(&self) -> bool {
        !self.password.expose_secret().is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeviceSelection {
    category: Option<DeviceType>,
    device: Option<NetworkDevice>,
    method: ConnectionMethod,
}

impl DeviceSelection {
    pub fn category(&self) -> Option<DeviceType> {
        self.category
    }

    pub fn device(&self) -> Option<&NetworkDevice> {
        self.device.as_ref()
    }

    /// Switch category. Always drops the selected device.
    pub fn select_category(&mut self, category: DeviceType) {
        self.category = Some(category);
        self.device = None;
    }

    /// Select a device from the current category listing.
    pub fn select_device(
        &mut self,
        catalog: &Catalog,
        id: &str,
    ) -> Result<&NetworkDevice, CoreError> {
        let category = self
            .category
            .ok_or_else(|| CoreError::validation("select a device category first"))?;
        let device = catalog
            .list_devices(category)
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| CoreError::not_found(&format!("{category} device"), id))?;

        Ok(self.device.insert(device.clone()))
    }

    pub fn set_method(&mut self, method: ConnectionMethod) {
        self.method = method;
    }

    pub fn connect(
        &self,
        credentials: Option<&DeviceCredentials>,
    ) -> Result<ConnectionPlan, CoreError> {
        let device = self
            .device
            .clone()
            .ok_or_else(|| CoreError::validation("no device selected"))?;
        let credentials = credentials.ok_or_else(|| CoreError::Config {
            message: "device credentials are not configured".into(),
        })?;

        Ok(ConnectionPlan {
            device,
            method: self.method,
            port: self.method.default_port(),
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn creds() -> DeviceCredentials {
        DeviceCredentials {
            username: "netops".into(),
            password: SecretString::from("hunter2".to_owned()),
        }
    }

    #[test]
    fn category_change_resets_device() {
        let catalog = Catalog::builtin();
        let mut sel = DeviceSelection::default();
        sel.select_category(DeviceType::Core);
        sel.select_device(&catalog, "cs-01").unwrap();
        sel.select_category(DeviceType::Distribution);
        assert!(sel.device().is_none());
    }

    #[test]
    fn device_must_be_listed_under_category() {
        let catalog = Catalog::builtin();
        let mut sel = DeviceSelection::default();
        assert!(matches!(
            sel.select_device(&catalog, "cs-01"),
            Err(CoreError::Validation { .. })
        ));

        sel.select_category(DeviceType::Core);
        // Offline core devices are not selectable.
        assert!(matches!(
            sel.select_device(&catalog, "r-02"),
            Err(CoreError::NotFound { .. })
        ));
        assert!(matches!(
            sel.select_device(&catalog, "ap-02"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn connect_builds_plan_from_method() {
        let catalog = Catalog::builtin();
        let mut sel = DeviceSelection::default();
        sel.select_category(DeviceType::AccessPoint);
        sel.select_device(&catalog, "ap-04").unwrap();

        let plan = sel.connect(Some(&creds())).unwrap();
        assert_eq!(plan.method, ConnectionMethod::Ssh);
        assert_eq!(plan.port, 22);
        assert_eq!(plan.username, "netops");
        assert!(plan.has_password());

        sel.set_method(ConnectionMethod::Snmp);
        assert_eq!(sel.connect(Some(&creds())).unwrap().port, 161);
    }

    #[test]
    fn connect_requires_device_and_credentials() {
        let catalog = Catalog::builtin();
        let mut sel = DeviceSelection::default();
        assert!(matches!(
            sel.connect(Some(&creds())),
            Err(CoreError::Validation { .. })
        ));

        sel.select_category(DeviceType::Core);
        sel.select_device(&catalog, "fw-01").unwrap();
        assert!(matches!(sel.connect(None), Err(CoreError::Config { .. })));
    }
}
