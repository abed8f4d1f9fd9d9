use anyhow::{bail, Context, Result};
use pigment_core::color::{Color, ColorArg, Representation};
use pigment_core::logging::{init_logging, LoggingConfig};

const USAGE: &str = "usage: pigment-studio [--as <repr>] [--json] [--hex] <color args...>

  pigment-studio red
  pigment-studio '#ff8000' --as hsl
  pigment-studio hsb 120 0.5 0.5 --json";

#[derive(Debug, Default)]
struct Options {
    args: Vec<ColorArg>,
    target: Option<Representation>,
    json: bool,
    hex: bool,
}

fn parse_options(raw: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut options = Options::default();
    let mut raw = raw.into_iter();
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--as" => {
                let name = raw.next().context("`--as` needs a representation name")?;
                options.target = Some(name.parse().with_context(|| format!("bad `--as` value {name:?}"))?);
            }
            "--json" => options.json = true,
            "--hex" => options.hex = true,
            "-h" | "--help" => bail!("{USAGE}"),
            _ => options.args.push(match arg.parse::<f64>() {
                Ok(v) => ColorArg::Number(v),
                Err(_) => ColorArg::Str(arg),
            }),
        }
    }
    if options.args.is_empty() {
        bail!("no color given\n\n{USAGE}");
    }
    Ok(options)
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let options = parse_options(std::env::args().skip(1))?;
    let mut color = Color::from_args(&options.args).context("failed to build color")?;
    if let Some(target) = options.target {
        color
            .set_representation(target)
            .with_context(|| format!("cannot show {} color as {target}", color.representation()))?;
    }
    log::debug!("parsed {:?}", color);

    println!("{color}");
    println!("{}", color.to_css(false).context("failed to render css")?);
    if options.hex {
        println!("{}", color.to_css_hex().context("failed to render hex")?);
    }
    if options.json {
        println!("{}", serde_json::to_string_pretty(&color).context("failed to serialize color")?);
    }
    Ok(())
}
