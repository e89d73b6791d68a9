use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use features_roles::{
    decode, in_namespace, lookup, parse_value, registry, try_not, BitFlag, Category,
    DeploymentPlan, Namespace, ResolvedContract, ResolvedPlan, U256,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "features-roles",
    version,
    about = "Inspect and combine ERC20 token and tunnel feature/role bitmasks"
)]
struct Cli {
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum NamespaceArg {
    Shared,
    Erc20,
    Tunnel,
}

impl From<NamespaceArg> for Namespace {
    fn from(value: NamespaceArg) -> Self {
        match value {
            NamespaceArg::Shared => Namespace::Shared,
            NamespaceArg::Erc20 => Namespace::Erc20,
            NamespaceArg::Tunnel => Namespace::Tunnel,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List every known feature and role
    List(ListArgs),
    /// Show a single feature or role
    Get(GetArgs),
    /// Negate a set of roles against FULL_PRIVILEGES_MASK
    Not(NotArgs),
    /// Name the flags set in a mask
    Decode(DecodeArgs),
    /// Resolve a deployment role plan (TOML or YAML)
    Plan(PlanArgs),
}

#[derive(Parser)]
struct ListArgs {
    #[arg(long, value_enum)]
    namespace: Option<NamespaceArg>,
}

#[derive(Parser)]
struct GetArgs {
    name: String,
}

#[derive(Parser)]
struct NotArgs {
    /// Names, hex or decimal literals, or `A|B` unions
    values: Vec<String>,
}

#[derive(Parser)]
struct DecodeArgs {
    value: String,

    #[arg(long, value_enum, default_value = "erc20")]
    namespace: NamespaceArg,
}

#[derive(Parser)]
struct PlanArgs {
    #[arg(long)]
    config: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::List(args) => handle_list(cli.output, args),
        Commands::Get(args) => handle_get(cli.output, args),
        Commands::Not(args) => handle_not(cli.output, args),
        Commands::Decode(args) => handle_decode(cli.output, args),
        Commands::Plan(args) => handle_plan(cli.output, args),
    }
}

fn handle_list(output: OutputFormat, args: &ListArgs) -> Result<()> {
    let entries = list_entries(args);

    if output == OutputFormat::Json {
        print_json(&entries)
    } else {
        for entry in &entries {
            println!("{:<30} {:<16} {}", entry.name, entry.category, short_hex(entry.raw));
        }
        Ok(())
    }
}

fn list_entries(args: &ListArgs) -> Vec<EntryOutput> {
    match args.namespace {
        Some(namespace) => in_namespace(namespace.into()).map(EntryOutput::from).collect(),
        None => registry().iter().map(EntryOutput::from).collect(),
    }
}

fn handle_get(output: OutputFormat, args: &GetArgs) -> Result<()> {
    let entry = get_entry(args)?;

    if output == OutputFormat::Json {
        print_json(&entry)
    } else {
        println!("Name:        {}", entry.name);
        println!("Category:    {}", entry.category);
        println!("Namespace:   {}", entry.namespace);
        println!("Hex:         {}", entry.value);
        println!("Decimal:     {}", entry.decimal);
        match entry.bit {
            Some(bit) => println!("Bit:         {}", bit),
            None => println!("Bits set:    {}", entry.raw.count_ones()),
        }
        println!("Description: {}", entry.description);
        Ok(())
    }
}

fn get_entry(args: &GetArgs) -> Result<EntryOutput> {
    let flag = lookup(&args.name.to_ascii_uppercase())
        .with_context(|| format!("Unknown feature or role: {}", args.name))?;
    Ok(EntryOutput::from(flag))
}

fn handle_not(output: OutputFormat, args: &NotArgs) -> Result<()> {
    let negated = negate(args)?;

    if output == OutputFormat::Json {
        print_json(&negated)
    } else {
        println!("{}", negated.value);
        Ok(())
    }
}

fn negate(args: &NotArgs) -> Result<NotOutput> {
    let value = try_not(&args.values)?;
    tracing::debug!(inputs = args.values.len(), "computed negation");
    Ok(NotOutput {
        inputs: args.values.clone(),
        value: format!("{:#x}", value),
        decimal: value.to_string(),
    })
}

fn handle_decode(output: OutputFormat, args: &DecodeArgs) -> Result<()> {
    let decoded = decode_mask(args)?;

    if output == OutputFormat::Json {
        print_json(&decoded)
    } else {
        if decoded.names.is_empty() {
            println!("No {} flags set", decoded.namespace);
        }
        for name in &decoded.names {
            println!("{}", name);
        }
        if !decoded.residual_raw.is_zero() {
            println!("Unnamed bits: {}", short_hex(decoded.residual_raw));
        }
        Ok(())
    }
}

fn decode_mask(args: &DecodeArgs) -> Result<DecodeOutput> {
    let value = parse_value(&args.value)?;
    let namespace = Namespace::from(args.namespace);
    let decoded = decode(value, namespace);
    Ok(DecodeOutput {
        value: format!("{:#x}", value),
        namespace,
        names: decoded.names,
        residual: format!("{:#x}", decoded.residual),
        residual_raw: decoded.residual,
    })
}

fn handle_plan(output: OutputFormat, args: &PlanArgs) -> Result<()> {
    let plan = load_plan(&args.config)?;
    let resolved = plan
        .resolve()
        .with_context(|| format!("Failed to resolve plan: {}", args.config))?;

    if output == OutputFormat::Json {
        print_json(&resolved)
    } else {
        print_plan(&resolved);
        Ok(())
    }
}

fn print_plan(plan: &ResolvedPlan) {
    let contracts = [("Token", plan.token.as_ref()), ("Tunnel", plan.tunnel.as_ref())];
    let mut printed = false;
    for (label, contract) in contracts {
        if let Some(contract) = contract {
            print_contract(label, contract);
            printed = true;
        }
    }
    if !printed {
        println!("Plan is empty");
    }
}

fn print_contract(label: &str, contract: &ResolvedContract) {
    println!("{}", label);
    println!("  Features: {}", short_hex(contract.features));
    for name in decode(contract.features, contract.namespace).names {
        println!("    {}", name);
    }
    if contract.roles.is_empty() {
        println!("  No role grants");
    }
    for grant in &contract.roles {
        println!("  {} {}", grant.address, short_hex(grant.roles));
    }
}

fn load_plan(path: &str) -> Result<DeploymentPlan> {
    let path = expand_tilde(path);
    tracing::debug!(path = %path.display(), "loading deployment plan");
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    if is_yaml(&path) {
        serde_yaml::from_str(&contents).context("Failed to parse config")
    } else {
        toml::from_str(&contents).context("Failed to parse config")
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yml") | Some("yaml")
    )
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Full-width masks print as `~0x…` of their complement to stay readable.
fn short_hex(value: U256) -> String {
    if value.count_ones() > 128 {
        format!("~{:#x}", !value)
    } else {
        format!("{:#x}", value)
    }
}

#[derive(Serialize)]
struct EntryOutput {
    name: &'static str,
    value: String,
    decimal: String,
    bit: Option<usize>,
    category: Category,
    namespace: Namespace,
    description: &'static str,
    #[serde(skip)]
    raw: U256,
}

impl From<&BitFlag> for EntryOutput {
    fn from(flag: &BitFlag) -> Self {
        Self {
            name: flag.name,
            value: format!("{:#x}", flag.value),
            decimal: flag.value.to_string(),
            bit: flag.bit(),
            category: flag.category,
            namespace: flag.namespace(),
            description: flag.description,
            raw: flag.value,
        }
    }
}

#[derive(Serialize)]
struct NotOutput {
    inputs: Vec<String>,
    value: String,
    decimal: String,
}

#[derive(Serialize)]
struct DecodeOutput {
    value: String,
    namespace: Namespace,
    names: Vec<&'static str>,
    residual: String,
    #[serde(skip)]
    residual_raw: U256,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        decode_mask, expand_tilde, get_entry, is_yaml, list_entries, load_plan, negate,
        short_hex, Cli, Commands, EntryOutput,
    };
    use clap::Parser;
    use features_roles::constants::{
        FEATURE_ALL, FEATURE_ENTRANCE_OPEN, FEATURE_TRANSFERS, FULL_PRIVILEGES_MASK,
        ROLE_ACCESS_MANAGER, ROLE_TOKEN_CREATOR,
    };
    use features_roles::{lookup, not, Namespace, U256};
    use std::io::Write;
    use std::path::Path;

    #[test]
    fn formats_masks() {
        assert_eq!(short_hex(FEATURE_ALL), "0xffff");
        assert_eq!(short_hex(U256::ZERO), "0x0");
        assert_eq!(short_hex(FULL_PRIVILEGES_MASK), "~0x0");
        assert_eq!(short_hex(not([ROLE_TOKEN_CREATOR])), "~0x10000");
        assert_eq!(
            short_hex(ROLE_ACCESS_MANAGER),
            format!("0x8{}", "0".repeat(63))
        );
    }

    #[test]
    fn entry_output_carries_bit_and_namespace() {
        let entry = EntryOutput::from(lookup("FEATURE_TRANSFERS").unwrap());
        assert_eq!(entry.value, "0x1");
        assert_eq!(entry.decimal, "1");
        assert_eq!(entry.bit, Some(0));
        assert_eq!(entry.raw, FEATURE_TRANSFERS);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["namespace"], "erc20");
        assert_eq!(json["category"], "erc20_feature");
        assert!(json.get("raw").is_none());
    }

    fn command(args: &[&str]) -> Commands {
        let mut argv = vec!["features-roles"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn list_filters_by_namespace() {
        let Commands::List(args) = command(&["list", "--namespace", "tunnel"]) else {
            panic!("expected list");
        };
        let names: Vec<_> = list_entries(&args).iter().map(|entry| entry.name).collect();
        assert_eq!(names, vec!["FEATURE_ENTRANCE_OPEN", "ROLE_RESCUE_MANAGER"]);

        let Commands::List(args) = command(&["list", "--namespace", "shared"]) else {
            panic!("expected list");
        };
        assert!(list_entries(&args)
            .iter()
            .all(|entry| entry.namespace == Namespace::Shared));

        let Commands::List(args) = command(&["list"]) else {
            panic!("expected list");
        };
        assert_eq!(list_entries(&args).len(), 23);
    }

    #[test]
    fn get_folds_case() {
        let Commands::Get(args) = command(&["get", "role_rescue_manager"]) else {
            panic!("expected get");
        };
        let entry = get_entry(&args).unwrap();
        assert_eq!(entry.name, "ROLE_RESCUE_MANAGER");
        assert_eq!(entry.value, "0x100000");
        assert_eq!(entry.bit, Some(20));
        assert_eq!(entry.namespace, Namespace::Tunnel);

        let Commands::Get(args) = command(&["get", "ROLE_MINTER"]) else {
            panic!("expected get");
        };
        assert!(get_entry(&args).is_err());
    }

    #[test]
    fn not_negates_names_and_literals() {
        let Commands::Not(args) =
            command(&["--output", "json", "not", "FEATURE_TRANSFERS", "0x8"])
        else {
            panic!("expected not");
        };
        let negated = negate(&args).unwrap();
        let expected = U256::MAX - U256::from(0b1001u64);
        assert_eq!(negated.inputs, vec!["FEATURE_TRANSFERS", "0x8"]);
        assert_eq!(negated.value, format!("{:#x}", expected));
        assert_eq!(negated.decimal, expected.to_string());

        let Commands::Not(args) = command(&["not"]) else {
            panic!("expected not");
        };
        assert_eq!(
            negate(&args).unwrap().value,
            format!("{:#x}", FULL_PRIVILEGES_MASK)
        );

        let Commands::Not(args) = command(&["not", "ROLE_TOKEN_CREATOR|"]) else {
            panic!("expected not");
        };
        assert!(negate(&args).is_err());
    }

    #[test]
    fn decode_defaults_to_the_token_space() {
        let Commands::Decode(args) = command(&["decode", "0x100001"]) else {
            panic!("expected decode");
        };
        let decoded = decode_mask(&args).unwrap();
        assert_eq!(decoded.namespace, Namespace::Erc20);
        assert_eq!(decoded.names, vec!["FEATURE_TRANSFERS"]);
        assert_eq!(decoded.residual, "0x100000");

        let Commands::Decode(args) =
            command(&["decode", "0x100001", "--namespace", "tunnel"])
        else {
            panic!("expected decode");
        };
        let decoded = decode_mask(&args).unwrap();
        assert_eq!(
            decoded.names,
            vec!["FEATURE_ENTRANCE_OPEN", "ROLE_RESCUE_MANAGER"]
        );
        assert_eq!(decoded.residual, "0x0");
    }

    #[test]
    fn detects_yaml_configs() {
        assert!(is_yaml(Path::new("plan.yml")));
        assert!(is_yaml(Path::new("plan.yaml")));
        assert!(!is_yaml(Path::new("plan.toml")));
    }

    #[test]
    fn leaves_plain_paths_alone() {
        assert_eq!(expand_tilde("plans/roles.toml"), Path::new("plans/roles.toml"));
    }

    #[test]
    fn loads_yaml_plans() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "token:\n  features: [FEATURE_TRANSFERS]\n  roles:\n    - address: \"0x00000000000000000000000000000000000000c1\"\n      grant: [ROLE_TOKEN_CREATOR]"
        )
        .unwrap();

        let plan = load_plan(file.path().to_str().unwrap()).unwrap();
        let token = plan.resolve().unwrap().token.unwrap();
        assert_eq!(token.features, FEATURE_TRANSFERS);
        assert_eq!(token.roles[0].roles, ROLE_TOKEN_CREATOR);
    }

    #[test]
    fn loads_toml_plans() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[tunnel]\nfeatures = [\"FEATURE_ENTRANCE_OPEN\"]").unwrap();

        let plan = load_plan(file.path().to_str().unwrap()).unwrap();
        let resolved = plan.resolve().unwrap();
        assert!(resolved.token.is_none());
        assert_eq!(resolved.tunnel.unwrap().features, FEATURE_ENTRANCE_OPEN);
    }
}
