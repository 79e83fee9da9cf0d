//! Server network configuration.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::query::{QueryWriter, ToQueryString};

/// Listening ports, HTTPS and LAN/remote access settings of a server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NetworkConfiguration {
    /// URL path prefix the server is mounted under (e.g. "/jellyfin")
    #[serde(rename = "BaseUrl", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(rename = "EnableHttps", default, skip_serializing_if = "Option::is_none")]
    pub enable_https: Option<bool>,

    #[serde(rename = "RequireHttps", default, skip_serializing_if = "Option::is_none")]
    pub require_https: Option<bool>,

    /// PKCS#12 certificate file
    #[serde(rename = "CertificatePath", default, skip_serializing_if = "Option::is_none")]
    pub certificate_path: Option<String>,

    #[serde(rename = "CertificatePassword", default, skip_serializing_if = "Option::is_none")]
    pub certificate_password: Option<String>,

    #[serde(rename = "InternalHttpPort", default, skip_serializing_if = "Option::is_none")]
    pub internal_http_port: Option<i32>,

    #[serde(rename = "InternalHttpsPort", default, skip_serializing_if = "Option::is_none")]
    pub internal_https_port: Option<i32>,

    #[serde(rename = "PublicHttpPort", default, skip_serializing_if = "Option::is_none")]
    pub public_http_port: Option<i32>,

    #[serde(rename = "PublicHttpsPort", default, skip_serializing_if = "Option::is_none")]
    pub public_https_port: Option<i32>,

    /// Answer client discovery broadcasts on the LAN
    #[serde(rename = "AutoDiscovery", default, skip_serializing_if = "Option::is_none")]
    pub auto_discovery: Option<bool>,

    #[serde(rename = "EnableUPnP", default, skip_serializing_if = "Option::is_none")]
    pub enable_upnp: Option<bool>,

    #[serde(rename = "EnableIPv4", default, skip_serializing_if = "Option::is_none")]
    pub enable_ipv4: Option<bool>,

    #[serde(rename = "EnableIPv6", default, skip_serializing_if = "Option::is_none")]
    pub enable_ipv6: Option<bool>,

    #[serde(rename = "EnableRemoteAccess", default, skip_serializing_if = "Option::is_none")]
    pub enable_remote_access: Option<bool>,

    /// Subnets treated as local, in CIDR notation
    #[serde(rename = "LocalNetworkSubnets", default, skip_serializing_if = "Option::is_none")]
    pub local_network_subnets: Option<Vec<String>>,

    /// Interface addresses to bind to
    #[serde(rename = "LocalNetworkAddresses", default, skip_serializing_if = "Option::is_none")]
    pub local_network_addresses: Option<Vec<String>>,

    /// Reverse proxies whose forwarded headers are trusted
    #[serde(rename = "KnownProxies", default, skip_serializing_if = "Option::is_none")]
    pub known_proxies: Option<Vec<String>>,

    #[serde(rename = "IgnoreVirtualInterfaces", default, skip_serializing_if = "Option::is_none")]
    pub ignore_virtual_interfaces: Option<bool>,

    #[serde(rename = "VirtualInterfaceNames", default, skip_serializing_if = "Option::is_none")]
    pub virtual_interface_names: Option<Vec<String>>,

    #[serde(
        rename = "EnablePublishedServerUriByRequest",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_published_server_uri_by_request: Option<bool>,

    /// Overrides of the advertised server URI, as "subnet=uri" entries
    #[serde(
        rename = "PublishedServerUriBySubnet",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published_server_uri_by_subnet: Option<Vec<String>>,

    #[serde(rename = "RemoteIPFilter", default, skip_serializing_if = "Option::is_none")]
    pub remote_ip_filter: Option<Vec<String>>,

    /// Treat `RemoteIPFilter` as a deny list instead of an allow list
    #[serde(rename = "IsRemoteIPFilterBlacklist", default, skip_serializing_if = "Option::is_none")]
    pub is_remote_ip_filter_blacklist: Option<bool>,
}

impl NetworkConfiguration {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_http_ports(mut self, internal: i32, public: i32) -> Self {
        self.internal_http_port = Some(internal);
        self.public_http_port = Some(public);
        self
    }

    pub fn with_known_proxies<I, S>(mut self, proxies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_proxies = Some(proxies.into_iter().map(Into::into).collect());
        self
    }
}

impl ToQueryString for NetworkConfiguration {
    fn write_query(&self, query: &mut QueryWriter) {
        query.value("BaseUrl", &self.base_url);
        query.value("EnableHttps", &self.enable_https);
        query.value("RequireHttps", &self.require_https);
        query.value("CertificatePath", &self.certificate_path);
        query.value("CertificatePassword", &self.certificate_password);
        query.value("InternalHttpPort", &self.internal_http_port);
        query.value("InternalHttpsPort", &self.internal_https_port);
        query.value("PublicHttpPort", &self.public_http_port);
        query.value("PublicHttpsPort", &self.public_https_port);
        query.value("AutoDiscovery", &self.auto_discovery);
        query.value("EnableUPnP", &self.enable_upnp);
        query.value("EnableIPv4", &self.enable_ipv4);
        query.value("EnableIPv6", &self.enable_ipv6);
        query.value("EnableRemoteAccess", &self.enable_remote_access);
        query.values("LocalNetworkSubnets", &self.local_network_subnets);
        query.values("LocalNetworkAddresses", &self.local_network_addresses);
        query.values("KnownProxies", &self.known_proxies);
        query.value("IgnoreVirtualInterfaces", &self.ignore_virtual_interfaces);
        query.values("VirtualInterfaceNames", &self.virtual_interface_names);
        query.value(
            "EnablePublishedServerUriByRequest",
            &self.enable_published_server_uri_by_request,
        );
        query.values(
            "PublishedServerUriBySubnet",
            &self.published_server_uri_by_subnet,
        );
        query.values("RemoteIPFilter", &self.remote_ip_filter);
        query.value(
            "IsRemoteIPFilterBlacklist",
            &self.is_remote_ip_filter_blacklist,
        );
    }
}
