//! Provisioning related sections: `[clients]`, `[compute_resources]`,
//! `[discovery]` and `[vlan_networking]`.

use crate::config::error::ConfigError;
use crate::config::reader::IniReader;
use crate::config::validation::{fields, Rule};

use super::FeatureSettings;

/// Client images and the provisioning host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientsSettings {
    pub image_dir: Option<String>,
    pub provisioning_server: Option<String>,
}

impl FeatureSettings for ClientsSettings {
    fn section(&self) -> &'static str {
        "clients"
    }

    fn read(&mut self, reader: &IniReader) -> Result<(), ConfigError> {
        self.image_dir = Some(reader.get_str("clients", "image_dir", "/opt/robottelo/images"));
        self.provisioning_server = reader.get_str_opt("clients", "provisioning_server");
        Ok(())
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule::required(
            &self.provisioning_server,
            "[clients] provisioning_server option must be provided.",
        )]
    }
}

/// Libvirt host used as a compute resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibvirtHostSettings {
    pub libvirt_image_dir: Option<String>,
    pub libvirt_hostname: Option<String>,
}

impl FeatureSettings for LibvirtHostSettings {
    fn section(&self) -> &'static str {
        "compute_resources"
    }

    fn read(&mut self, reader: &IniReader) -> Result<(), ConfigError> {
        self.libvirt_image_dir = Some(reader.get_str(
            "compute_resources",
            "libvirt_image_dir",
            "/var/lib/libvirt/images",
        ));
        self.libvirt_hostname = reader.get_str_opt("compute_resources", "libvirt_hostname");
        Ok(())
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule::required(
            &self.libvirt_hostname,
            "[compute_resources] libvirt_hostname option must be provided.",
        )]
    }
}

/// Discovery ISO name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryIsoSettings {
    pub discovery_iso: Option<String>,
}

impl FeatureSettings for DiscoveryIsoSettings {
    fn section(&self) -> &'static str {
        "discovery"
    }

    fn read(&mut self, reader: &IniReader) -> Result<(), ConfigError> {
        self.discovery_iso = reader.get_str_opt("discovery", "discovery_iso");
        Ok(())
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule::required(
            &self.discovery_iso,
            "[discovery] discovery iso name must be provided.",
        )]
    }
}

/// Bridged VLAN network for provisioned hosts. All or nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VlanNetworkSettings {
    pub subnet: Option<String>,
    pub netmask: Option<String>,
    pub gateway: Option<String>,
    pub bridge: Option<String>,
}

impl FeatureSettings for VlanNetworkSettings {
    fn section(&self) -> &'static str {
        "vlan_networking"
    }

    fn read(&mut self, reader: &IniReader) -> Result<(), ConfigError> {
        self.subnet = reader.get_str_opt("vlan_networking", "subnet");
        self.netmask = reader.get_str_opt("vlan_networking", "netmask");
        self.gateway = reader.get_str_opt("vlan_networking", "gateway");
        self.bridge = reader.get_str_opt("vlan_networking", "bridge");
        Ok(())
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule::all_of(
            fields![self.subnet, self.netmask, self.gateway, self.bridge],
            "All [vlan_networking] subnet, netmask, gateway, bridge options must be provided.",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(content: &str) -> IniReader {
        IniReader::parse(content, "test.properties").unwrap()
    }

    #[test]
    fn clients_default_image_dir() {
        let mut clients = ClientsSettings::default();
        clients.read(&reader("[clients]\n")).unwrap();
        assert_eq!(clients.image_dir.as_deref(), Some("/opt/robottelo/images"));
        assert_eq!(
            clients.validate(),
            vec!["[clients] provisioning_server option must be provided."]
        );
    }

    #[test]
    fn libvirt_host_requires_hostname() {
        let mut libvirt = LibvirtHostSettings::default();
        libvirt
            .read(&reader("[compute_resources]\nlibvirt_hostname = virt.example.com\n"))
            .unwrap();
        assert_eq!(libvirt.libvirt_image_dir.as_deref(), Some("/var/lib/libvirt/images"));
        assert!(libvirt.validate().is_empty());
    }

    #[test]
    fn discovery_requires_iso() {
        let mut discovery = DiscoveryIsoSettings::default();
        discovery.read(&reader("[discovery]\n")).unwrap();
        assert_eq!(
            discovery.validate(),
            vec!["[discovery] discovery iso name must be provided."]
        );
    }

    #[test]
    fn vlan_network_is_all_or_nothing() {
        let mut vlan = VlanNetworkSettings::default();
        vlan.read(&reader(
            "[vlan_networking]\nsubnet = 192.168.3.0\nnetmask = 255.255.255.0\ngateway = 192.168.3.1\n",
        ))
        .unwrap();
        assert_eq!(vlan.validate().len(), 1);

        vlan.bridge = Some("br0".into());
        assert!(vlan.validate().is_empty());
    }
}
