use aoc2023::{solutions, Args, Parser};

fn main() {
    solutions().run(&Args::parse());
}
