mod cli;
mod commands;

use cli::{AstParams, EditParams, GenParams, build_cli, init_logging};

fn main() {
    let matches = build_cli().get_matches();
    let Some((name, m)) = matches.subcommand() else {
        unreachable!("clap should have caught this")
    };
    init_logging(m.get_count("verbose"));

    match name {
        "gen" => {
            let params = GenParams::from_matches(m);
            commands::generate::run(params.into());
        }
        "ast" => {
            let params = AstParams::from_matches(m);
            commands::ast::run(params.into());
        }
        "edit" => {
            let params = EditParams::from_matches(m);
            commands::edit::run(params.into());
        }
        "langs" => commands::langs::run(),
        _ => unreachable!("clap should have caught this"),
    }
}
