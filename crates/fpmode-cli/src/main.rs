use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use fpmode::test_harness::{
    block, connect, count_mode_writes, f16_arith, f32_arith, fp8_pack_ovfl, linear_program,
    narrowing_cvt,
};
use fpmode::{GfxLevel, Instruction, Opcode, Program, insert_fp_mode};

#[derive(Parser)]
#[command(name = "fpmode")]
#[command(about = "Inspect the FP mode insertion pass on bundled demo programs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pass over a demo program and print the before/after listing.
    Demo {
        #[arg(value_enum)]
        name: DemoName,

        #[arg(long, value_enum, default_value = "gfx11")]
        gfx: Gfx,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DemoName {
    /// One block mixing default and forced-rounding instructions.
    Straightline,
    /// A diamond whose arms disagree on the rounding mode.
    Diamond,
    /// A loop whose body changes the mode on every iteration.
    Loop,
    /// Every pseudo-opcode the pass lowers.
    Pseudo,
}

#[derive(Clone, Copy, ValueEnum)]
enum Gfx {
    Gfx9,
    Gfx10,
    Gfx11,
    Gfx12,
}

impl From<Gfx> for GfxLevel {
    fn from(gfx: Gfx) -> Self {
        match gfx {
            Gfx::Gfx9 => GfxLevel::Gfx9,
            Gfx::Gfx10 => GfxLevel::Gfx10,
            Gfx::Gfx11 => GfxLevel::Gfx11,
            Gfx::Gfx12 => GfxLevel::Gfx12,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { name, gfx } => {
            let mut program = build_demo(name, gfx.into());

            println!("; before");
            print!("{program}");

            insert_fp_mode(&mut program).context("FP mode insertion failed")?;

            println!();
            println!("; after ({} mode writes)", count_mode_writes(&program));
            print!("{program}");
        }
    }

    Ok(())
}

fn build_demo(name: DemoName, gfx_level: GfxLevel) -> Program {
    match name {
        DemoName::Straightline => linear_program(
            gfx_level,
            vec![vec![
                f32_arith(),
                narrowing_cvt(Opcode::PVCvtF16F32Rtni),
                f16_arith(),
            ]],
        ),
        DemoName::Diamond => {
            let mut program = Program::new(gfx_level);
            program.blocks.push(block(0, vec![f32_arith()]));
            program
                .blocks
                .push(block(1, vec![narrowing_cvt(Opcode::PVCvtF16F32Rtpi)]));
            program.blocks.push(block(2, vec![f16_arith()]));
            program.blocks.push(block(3, vec![f32_arith()]));
            connect(&mut program, 0, 1);
            connect(&mut program, 0, 2);
            connect(&mut program, 1, 3);
            connect(&mut program, 2, 3);
            program
        }
        DemoName::Loop => {
            let mut program = Program::new(gfx_level);
            program.blocks.push(block(0, vec![]));
            program.blocks.push(block(1, vec![]));
            program.blocks.push(block(
                2,
                vec![narrowing_cvt(Opcode::PVCvtF16F32Rtpi), f16_arith()],
            ));
            program.blocks.push(block(3, vec![f32_arith()]));
            program.blocks[1].loop_header = true;
            connect(&mut program, 0, 1);
            connect(&mut program, 1, 2);
            connect(&mut program, 2, 1);
            connect(&mut program, 2, 3);
            program
        }
        DemoName::Pseudo => linear_program(
            gfx_level,
            vec![vec![
                narrowing_cvt(Opcode::PVCvtF16F32Rtne),
                narrowing_cvt(Opcode::PVCvtF16F32Rtpi),
                narrowing_cvt(Opcode::PVCvtF16F32Rtni),
                fp8_pack_ovfl(),
                Instruction::op(Opcode::SEndpgm),
            ]],
        ),
    }
}
