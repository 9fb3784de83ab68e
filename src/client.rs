// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

/// Describes a client version whose files can be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupportedClient {
    /// The client version, such as 860 for 8.60.
    pub version: u32,
    /// A human readable name, such as "Client 8.60".
    pub description: String,
    /// The expected signature at the start of the DAT file.
    pub dat_signature: u32,
    /// The expected signature at the start of the SPR file.
    pub spr_signature: u32,
    /// The OTB version matching this client.
    pub otb_version: u32,
    /// Whether sprite ids are 32-bit instead of 16-bit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub extended: bool,
    /// Whether sprites use an alpha channel. Only the sprite decoder looks at this.
    #[cfg_attr(feature = "serde", serde(default))]
    pub transparency: bool,
}

impl SupportedClient {
    pub fn new(version: u32, description: &str, dat_signature: u32, spr_signature: u32) -> Self {
        Self {
            version,
            description: description.to_string(),
            dat_signature,
            spr_signature,
            otb_version: 0,
            extended: false,
            transparency: false,
        }
    }
}

/// A list of clients, usually provided by the caller's settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SupportedClients {
    pub clients: Vec<SupportedClient>,
}

impl SupportedClients {
    pub fn new(clients: Vec<SupportedClient>) -> Self {
        Self { clients }
    }

    /// Finds the client whose DAT and SPR signatures both match.
    pub fn find_by_signatures(&self, dat_signature: u32, spr_signature: u32) -> Option<&SupportedClient> {
        self.clients
            .iter()
            .find(|c| c.dat_signature == dat_signature && c.spr_signature == spr_signature)
    }

    /// Finds the first client with this version.
    pub fn find_by_version(&self, version: u32) -> Option<&SupportedClient> {
        self.clients.iter().find(|c| c.version == version)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SupportedClient> {
        self.clients.iter()
    }
}
