//! Address commands.

use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::debug;
use uproto_uri::{
    resolve, Authority, LongUriCodec, MicroUriCodec, ShortUriCodec, Uri, UriCodec, UriValidator,
};

use crate::error::CliError;
use crate::output::{print_view, Field};

use super::CommandContext;

/// Decode, encode, and classify addresses.
#[derive(Debug, Args)]
pub struct UriCommand {
    #[command(subcommand)]
    command: UriSubcommand,
}

#[derive(Debug, Subcommand)]
enum UriSubcommand {
    /// Decode a long-form uri.
    Parse {
        /// e.g. //vcu.vin/body.access/1/door.front_left#Door
        uri: String,
    },

    /// Decode a hex-encoded micro-form uri.
    Micro {
        /// e.g. 0100271a0003fe00
        hex: String,
    },

    /// Decode a short-form uri.
    Short {
        /// e.g. //192.168.1.100/29999/254/19999
        uri: String,
    },

    /// Attach numeric ids to a long-form uri and print every form.
    Encode {
        /// Long-form uri supplying the names.
        uri: String,

        /// Entity id (0-65535).
        #[arg(long)]
        entity_id: u32,

        /// Resource id (0-65535).
        #[arg(long)]
        resource_id: u32,

        /// IP address of a remote authority.
        #[arg(long)]
        ip: Option<IpAddr>,
    },

    /// Merge a long-form and a hex micro-form uri into one resolved address.
    Resolve {
        /// Long-form uri supplying the names.
        long: String,

        /// Hex micro-form uri supplying the ids.
        micro: String,
    },
}

impl UriCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let uri = match self.command {
            UriSubcommand::Parse { uri } => decode(&LongUriCodec, "long", &uri)?,
            UriSubcommand::Micro { hex } => {
                let bytes = decode_hex(&hex)?;
                decode(&MicroUriCodec, "micro", bytes.as_slice()).map_err(|_| {
                    CliError::InvalidUri {
                        form: "micro",
                        input: hex,
                    }
                })?
            }
            UriSubcommand::Short { uri } => decode(&ShortUriCodec, "short", &uri)?,
            UriSubcommand::Encode {
                uri,
                entity_id,
                resource_id,
                ip,
            } => encode(&uri, entity_id, resource_id, ip)?,
            UriSubcommand::Resolve { long, micro } => {
                let bytes = decode_hex(&micro)?;
                resolve(&long, &bytes).ok_or(CliError::Unresolvable)?
            }
        };

        let view = UriView::new(uri);
        print_view(&view, &view.fields(), ctx.format);
        Ok(())
    }
}

fn decode<C>(codec: &C, form: &'static str, input: &C::Encoded) -> Result<Uri, CliError>
where
    C: UriCodec,
    C::Encoded: std::fmt::Debug,
{
    let uri = codec.deserialize(input);
    if uri.is_empty() {
        debug!(form, ?input, "decoded to empty uri");
        return Err(CliError::InvalidUri {
            form,
            input: format!("{input:?}"),
        });
    }
    Ok(uri)
}

fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    hex::decode(hex.trim().trim_start_matches("0x"))
        .with_context(|| format!("'{hex}' is not a hex string"))
}

fn encode(long: &str, entity_id: u32, resource_id: u32, ip: Option<IpAddr>) -> Result<Uri> {
    let uri = decode(&LongUriCodec, "long", long)?;

    let authority = match (uri.authority.name(), ip) {
        (Some(name), Some(ip)) => Authority::resolved_ip(name, ip),
        (None, Some(ip)) => Authority::from_ip(ip),
        (_, None) => uri.authority.clone(),
    };
    let entity = uri.entity.clone().with_id(entity_id)?;
    let resource = uri.resource.clone().with_id(resource_id)?;
    let encoded = Uri::new(authority, entity, resource);

    if !encoded.is_micro_form() {
        return Err(CliError::NotEncodable {
            form: "micro",
            reason: "a named authority also needs --ip".to_string(),
        }
        .into());
    }
    Ok(encoded)
}

#[derive(Debug, Serialize)]
struct Classification {
    empty: bool,
    local: bool,
    remote: bool,
    long_form: bool,
    micro_form: bool,
    short_form: bool,
    resolved: bool,
    rpc_method: bool,
    rpc_response: bool,
}

#[derive(Debug, Serialize)]
struct UriView {
    uri: Uri,
    long: String,
    micro: String,
    short: String,
    classification: Classification,
    validation: Option<String>,
}

impl UriView {
    fn new(uri: Uri) -> Self {
        let classification = Classification {
            empty: UriValidator::is_empty(&uri),
            local: UriValidator::is_local(&uri),
            remote: UriValidator::is_remote(&uri),
            long_form: UriValidator::is_long_form(&uri),
            micro_form: UriValidator::is_micro_form(&uri),
            short_form: UriValidator::is_short_form(&uri),
            resolved: UriValidator::is_resolved(&uri),
            rpc_method: UriValidator::is_rpc_method(&uri),
            rpc_response: UriValidator::is_rpc_response(&uri),
        };
        Self {
            long: LongUriCodec.serialize(&uri),
            micro: hex::encode(MicroUriCodec.serialize(&uri)),
            short: ShortUriCodec.serialize(&uri),
            validation: UriValidator::validate(&uri).err().map(|e| e.to_string()),
            classification,
            uri,
        }
    }

    fn fields(&self) -> Vec<Field> {
        let non_empty = |s: &str| Some(s.to_string()).filter(|s| !s.is_empty());
        let c = &self.classification;
        vec![
            Field::optional("long", non_empty(&self.long)),
            Field::optional("micro", non_empty(&self.micro)),
            Field::optional("short", non_empty(&self.short)),
            Field::new("local", c.local),
            Field::new("remote", c.remote),
            Field::new("resolved", c.resolved),
            Field::new("rpc method", c.rpc_method),
            Field::new("rpc response", c.rpc_response),
            Field::new("valid", self.validation.as_deref().unwrap_or("yes")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_local() {
        let uri = encode("/body.access/1/door.front_left", 29999, 0x8001, None).unwrap();
        assert!(uri.is_resolved());
        assert_eq!(uri.entity.id(), Some(29999));
    }

    #[test]
    fn test_encode_named_authority_needs_ip() {
        assert!(encode("//vcu/body.access/1/door", 1, 0x8001, None).is_err());

        let ip = "10.0.0.1".parse().unwrap();
        let uri = encode("//vcu/body.access/1/door", 1, 0x8001, Some(ip)).unwrap();
        assert!(uri.is_resolved());
        assert_eq!(uri.authority.name(), Some("vcu"));
    }

    #[test]
    fn test_encode_rejects_out_of_range_ids() {
        assert!(encode("/body.access/1/door", 70000, 1, None).is_err());
    }

    #[test]
    fn test_decode_invalid_long() {
        let err = decode(&LongUriCodec, "long", "nonsense").unwrap_err();
        assert!(matches!(err, CliError::InvalidUri { form: "long", .. }));
    }

    #[test]
    fn test_decode_hex_accepts_prefix() {
        assert_eq!(decode_hex("0x0100").unwrap(), vec![1, 0]);
        assert!(decode_hex("zz").is_err());
    }

    #[test]
    fn test_view_renders_all_forms() {
        let uri = encode("/body.access/1/door", 5, 0x8001, None).unwrap();
        let view = UriView::new(uri);
        assert_eq!(view.long, "/body.access/1/door");
        assert_eq!(view.micro, "0100800100050100");
        assert_eq!(view.short, "/5/1/32769");
        assert!(view.validation.is_none());
    }
}
