use clap::{arg, crate_version, Command};
use huffstream::codec::{Decoder, Encoder, Options};

const RCH: &str = "unreachable was reached";

fn parse_win_size(s: &str) -> Result<i64, String> {
    s.parse::<i64>().map_err(|e| e.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help = "Examples:
---------
Compress:      `huffstream compress -i my_expanded -o my_compressed`
Expand:        `huffstream expand -i my_compressed -o my_expanded`
Windowed:      `huffstream compress -w 256 -i my_expanded -o my_compressed`";

    let mut main_cmd = Command::new("huffstream")
        .about("Compress and expand with an adaptive Huffman stream codec")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(
        Command::new("compress")
            .arg(arg!(-i --input <PATH> "input path").required(true))
            .arg(arg!(-o --output <PATH> "output path").required(true))
            .arg(
                arg!(-w --window [SIZE] "sliding window size (0 = default 2048, negative = unbounded)")
                    .value_parser(parse_win_size)
                    .default_value("0"),
            )
            .about("compress a file"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("expand")
            .arg(arg!(-i --input <PATH> "input path").required(true))
            .arg(arg!(-o --output <PATH> "output path").required(true))
            .arg(
                arg!(-w --window [SIZE] "sliding window size, must match compression")
                    .value_parser(parse_win_size)
                    .default_value("0"),
            )
            .about("expand a file"),
    );

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let win_size = *cmd.get_one::<i64>("window").expect(RCH);
        let dat = std::fs::read(path_in)?;
        log::info!("compressing {} bytes from {}", dat.len(), path_in);
        let out_file = std::fs::File::create(path_out)?;
        let mut enc = Encoder::with_options(out_file, Options { win_size });
        enc.write(&dat).map_err(|(_, e)| e)?;
        enc.close()?;
    }

    if let Some(cmd) = matches.subcommand_matches("expand") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let win_size = *cmd.get_one::<i64>("window").expect(RCH);
        let dat = std::fs::read(path_in)?;
        log::info!("expanding {} bytes from {}", dat.len(), path_in);
        let mut dec = Decoder::with_options(dat.as_slice(), Options { win_size });
        let mut out = Vec::new();
        while let Some(b) = dec.read_byte()? {
            out.push(b);
        }
        std::fs::write(path_out, out)?;
    }

    Ok(())
}
