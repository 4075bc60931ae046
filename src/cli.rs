use clap::{Parser, ValueEnum};
use dd_binder::{NamespacePolicy, ReadOptions, WriteOptions};
use dd_descriptors::DescriptorKind;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Kind {
    Auto,
    Application,
    ApplicationClient,
    Connector,
    EjbJar,
    FacesConfig,
    WebApp,
    WebFragment,
    Taglib,
    Webservices,
}

impl Kind {
    pub fn descriptor_kind(self) -> Option<DescriptorKind> {
        Some(match self {
            Kind::Auto => return None,
            Kind::Application => DescriptorKind::Application,
            Kind::ApplicationClient => DescriptorKind::ApplicationClient,
            Kind::Connector => DescriptorKind::Connector,
            Kind::EjbJar => DescriptorKind::EjbJar,
            Kind::FacesConfig => DescriptorKind::FacesConfig,
            Kind::WebApp => DescriptorKind::WebApp,
            Kind::WebFragment => DescriptorKind::WebFragment,
            Kind::Taglib => DescriptorKind::Taglib,
            Kind::Webservices => DescriptorKind::Webservices,
        })
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Command {
    /// Read the descriptor and report every diagnostic
    Check,
    /// Read the descriptor and write it back in canonical form
    Print,
    /// Write the descriptor, read the output again and compare
    Roundtrip,
}

#[derive(Parser)]
#[clap(version, about)]
pub struct Cli {
    #[clap(value_parser, help = "What to do with the descriptor")]
    pub command: Command,

    #[clap(value_parser, help = "The source file or URL")]
    pub input: String,

    #[clap(long, help = "Allow a XML Document Type Definition (DTD) to occur")]
    pub allow_dtd: bool,

    #[clap(long, help = "Only bind elements in the current Java EE namespace")]
    pub strict_namespaces: bool,

    #[clap(long, help = "Do not accept JSP 1.1 element names in tag libraries")]
    pub no_legacy_names: bool,

    #[clap(long, help = "Fail if any diagnostic was recorded")]
    pub strict: bool,

    #[clap(long, default_value = "auto", value_parser)]
    pub kind: Kind,

    #[clap(long, help = "Indentation width of written XML, 0 for a single line")]
    pub indent: Option<usize>,

    #[clap(short, long, help = "Log what the binder is doing")]
    pub verbose: bool,
}

impl Cli {
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            allow_dtd: self.allow_dtd,
            namespaces: if self.strict_namespaces {
                NamespacePolicy::Strict
            } else {
                NamespacePolicy::Normalize
            },
            legacy_names: !self.no_legacy_names,
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            indent: match self.indent {
                Some(0) => None,
                Some(width) => Some(width),
                None => WriteOptions::default().indent,
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_follow_flags() {
        let cli = Cli::parse_from([
            "dd-tool",
            "--strict-namespaces",
            "--no-legacy-names",
            "--indent",
            "0",
            "--kind",
            "ejb-jar",
            "print",
            "ejb-jar.xml",
        ]);
        let read = cli.read_options();
        assert_eq!(read.namespaces, NamespacePolicy::Strict);
        assert!(!read.legacy_names);
        assert!(!read.allow_dtd);
        assert_eq!(cli.write_options().indent, None);
        assert_eq!(cli.kind.descriptor_kind(), Some(DescriptorKind::EjbJar));
        assert_eq!(cli.input, "ejb-jar.xml");
    }

    #[test]
    fn defaults_detect_the_kind() {
        let cli = Cli::parse_from(["dd-tool", "check", "web.xml"]);
        assert_eq!(cli.kind.descriptor_kind(), None);
        assert_eq!(cli.write_options().indent, Some(2));
        assert!(matches!(cli.command, Command::Check));
    }
}
