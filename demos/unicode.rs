use std::io::Read;

use glbarcode::{bars_to_blocks, encode, Symbology};

fn main() {
    let symbology: Symbology = match std::env::args().nth(1) {
        Some(id) => id.parse().unwrap(),
        None => Symbology::Any,
    };
    let mut msg = Vec::new();
    if atty::isnt(atty::Stream::Stdin) {
        let mut stdin = std::io::stdin();
        stdin.read_to_end(&mut msg).unwrap();
    }
    let msg = String::from_utf8(msg).unwrap();
    let code = encode(symbology, msg.trim_end().as_bytes()).unwrap();
    let string = bars_to_blocks(&code);
    println!("{} ({})", code.name(), code.text());
    println!("{}", &string);
    println!("{}", &string);
    println!("{}", &string);
}
