// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! The read-only catalog of host built-ins.
//!
//! Every Adder program runs against a fixed runtime surface: console and
//! keyboard routines, direct memory access, random numbers, string helpers,
//! and the sprite engine, plus the `COLOR_*` palette and `VIC_*` register
//! address constants. The catalog pre-populates the analyzer's function
//! table and global scope, and feeds completion and signature help.

use crate::types::Type;

/// Signature and documentation of one built-in function.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinFunction {
    pub name: &'static str,
    /// Parameter names and types, in declaration order.
    pub parameters: &'static [(&'static str, Type)],
    /// [`Type::Void`] for procedures.
    pub return_type: Type,
    pub doc: &'static str,
}

/// One built-in constant.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinConstant {
    pub name: &'static str,
    pub ty: Type,
    pub doc: &'static str,
}

/// All built-in functions, grouped roughly by subsystem.
pub const FUNCTIONS: &[BuiltinFunction] = &[
    // Screen and console
    BuiltinFunction {
        name: "cls",
        parameters: &[],
        return_type: Type::Void,
        doc: "Clear the screen.",
    },
    BuiltinFunction {
        name: "print",
        parameters: &[("text", Type::String)],
        return_type: Type::Void,
        doc: "Print text without a trailing newline.",
    },
    BuiltinFunction {
        name: "println",
        parameters: &[("text", Type::String)],
        return_type: Type::Void,
        doc: "Print text followed by a newline.",
    },
    BuiltinFunction {
        name: "cursor",
        parameters: &[("x", Type::Byte), ("y", Type::Byte)],
        return_type: Type::Void,
        doc: "Move the text cursor to column x, row y.",
    },
    // Keyboard
    BuiltinFunction {
        name: "get_key",
        parameters: &[],
        return_type: Type::Byte,
        doc: "Return the currently pressed key, or 0, without waiting.",
    },
    BuiltinFunction {
        name: "read",
        parameters: &[],
        return_type: Type::Byte,
        doc: "Wait for a key press and return it.",
    },
    BuiltinFunction {
        name: "readln",
        parameters: &[],
        return_type: Type::String,
        doc: "Read a line of input.",
    },
    // Memory
    BuiltinFunction {
        name: "poke",
        parameters: &[("address", Type::Word), ("value", Type::Byte)],
        return_type: Type::Void,
        doc: "Write a byte to a memory address.",
    },
    BuiltinFunction {
        name: "peek",
        parameters: &[("address", Type::Word)],
        return_type: Type::Byte,
        doc: "Read a byte from a memory address.",
    },
    // Random numbers
    BuiltinFunction {
        name: "rand",
        parameters: &[],
        return_type: Type::Fixed,
        doc: "Random fixed-point number between 0.0 and 15/16.",
    },
    BuiltinFunction {
        name: "rand_byte",
        parameters: &[("from", Type::Byte), ("to", Type::Byte)],
        return_type: Type::Byte,
        doc: "Random byte in the inclusive range [from, to].",
    },
    BuiltinFunction {
        name: "rand_sbyte",
        parameters: &[("from", Type::SByte), ("to", Type::SByte)],
        return_type: Type::SByte,
        doc: "Random signed byte in the inclusive range [from, to].",
    },
    BuiltinFunction {
        name: "rand_word",
        parameters: &[("from", Type::Word), ("to", Type::Word)],
        return_type: Type::Word,
        doc: "Random word in the inclusive range [from, to].",
    },
    BuiltinFunction {
        name: "rand_sword",
        parameters: &[("from", Type::SWord), ("to", Type::SWord)],
        return_type: Type::SWord,
        doc: "Random signed word in the inclusive range [from, to].",
    },
    BuiltinFunction {
        name: "seed",
        parameters: &[],
        return_type: Type::Void,
        doc: "Reseed the random number generator from hardware entropy.",
    },
    // Strings
    BuiltinFunction {
        name: "str_at",
        parameters: &[("text", Type::String), ("index", Type::Byte)],
        return_type: Type::Byte,
        doc: "Character code at a position in a string.",
    },
    // Sprites: visibility and position
    BuiltinFunction {
        name: "sprite_enable",
        parameters: &[("sprite", Type::Byte), ("enabled", Type::Bool)],
        return_type: Type::Void,
        doc: "Show or hide one sprite.",
    },
    BuiltinFunction {
        name: "sprites_enable",
        parameters: &[("mask", Type::Byte)],
        return_type: Type::Void,
        doc: "Show or hide sprites by bitmask.",
    },
    BuiltinFunction {
        name: "sprite_x",
        parameters: &[("sprite", Type::Byte), ("x", Type::Word)],
        return_type: Type::Void,
        doc: "Set a sprite's X position (0-511).",
    },
    BuiltinFunction {
        name: "sprite_y",
        parameters: &[("sprite", Type::Byte), ("y", Type::Byte)],
        return_type: Type::Void,
        doc: "Set a sprite's Y position (0-255).",
    },
    BuiltinFunction {
        name: "sprite_pos",
        parameters: &[("sprite", Type::Byte), ("x", Type::Word), ("y", Type::Byte)],
        return_type: Type::Void,
        doc: "Set a sprite's position.",
    },
    BuiltinFunction {
        name: "sprite_get_x",
        parameters: &[("sprite", Type::Byte)],
        return_type: Type::Word,
        doc: "Get a sprite's X position.",
    },
    BuiltinFunction {
        name: "sprite_get_y",
        parameters: &[("sprite", Type::Byte)],
        return_type: Type::Byte,
        doc: "Get a sprite's Y position.",
    },
    // Sprites: shape and color
    BuiltinFunction {
        name: "sprite_data",
        parameters: &[("sprite", Type::Byte), ("pointer", Type::Byte)],
        return_type: Type::Void,
        doc: "Set a sprite's shape data pointer.",
    },
    BuiltinFunction {
        name: "sprite_get_data",
        parameters: &[("sprite", Type::Byte)],
        return_type: Type::Byte,
        doc: "Get a sprite's shape data pointer.",
    },
    BuiltinFunction {
        name: "sprite_color",
        parameters: &[("sprite", Type::Byte), ("color", Type::Byte)],
        return_type: Type::Void,
        doc: "Set a sprite's color.",
    },
    BuiltinFunction {
        name: "sprite_get_color",
        parameters: &[("sprite", Type::Byte)],
        return_type: Type::Byte,
        doc: "Get a sprite's color.",
    },
    BuiltinFunction {
        name: "sprite_multicolor1",
        parameters: &[("color", Type::Byte)],
        return_type: Type::Void,
        doc: "Set shared multicolor 1.",
    },
    BuiltinFunction {
        name: "sprite_multicolor2",
        parameters: &[("color", Type::Byte)],
        return_type: Type::Void,
        doc: "Set shared multicolor 2.",
    },
    BuiltinFunction {
        name: "sprite_get_multicolor1",
        parameters: &[],
        return_type: Type::Byte,
        doc: "Get shared multicolor 1.",
    },
    BuiltinFunction {
        name: "sprite_get_multicolor2",
        parameters: &[],
        return_type: Type::Byte,
        doc: "Get shared multicolor 2.",
    },
    // Sprites: multicolor mode and expansion
    BuiltinFunction {
        name: "sprite_multicolor",
        parameters: &[("sprite", Type::Byte), ("enabled", Type::Bool)],
        return_type: Type::Void,
        doc: "Switch one sprite between hires and multicolor mode.",
    },
    BuiltinFunction {
        name: "sprites_multicolor",
        parameters: &[("mask", Type::Byte)],
        return_type: Type::Void,
        doc: "Set multicolor mode by bitmask.",
    },
    BuiltinFunction {
        name: "sprite_is_multicolor",
        parameters: &[("sprite", Type::Byte)],
        return_type: Type::Bool,
        doc: "Whether a sprite is in multicolor mode.",
    },
    BuiltinFunction {
        name: "sprite_expand_x",
        parameters: &[("sprite", Type::Byte), ("expanded", Type::Bool)],
        return_type: Type::Void,
        doc: "Double a sprite's width.",
    },
    BuiltinFunction {
        name: "sprite_expand_y",
        parameters: &[("sprite", Type::Byte), ("expanded", Type::Bool)],
        return_type: Type::Void,
        doc: "Double a sprite's height.",
    },
    BuiltinFunction {
        name: "sprites_expand_x",
        parameters: &[("mask", Type::Byte)],
        return_type: Type::Void,
        doc: "Set X expansion by bitmask.",
    },
    BuiltinFunction {
        name: "sprites_expand_y",
        parameters: &[("mask", Type::Byte)],
        return_type: Type::Void,
        doc: "Set Y expansion by bitmask.",
    },
    BuiltinFunction {
        name: "sprite_is_expanded_x",
        parameters: &[("sprite", Type::Byte)],
        return_type: Type::Bool,
        doc: "Whether a sprite is expanded horizontally.",
    },
    BuiltinFunction {
        name: "sprite_is_expanded_y",
        parameters: &[("sprite", Type::Byte)],
        return_type: Type::Bool,
        doc: "Whether a sprite is expanded vertically.",
    },
    // Sprites: priority and collisions
    BuiltinFunction {
        name: "sprite_priority",
        parameters: &[("sprite", Type::Byte), ("behind_background", Type::Bool)],
        return_type: Type::Void,
        doc: "Draw a sprite behind or in front of the background.",
    },
    BuiltinFunction {
        name: "sprites_priority",
        parameters: &[("mask", Type::Byte)],
        return_type: Type::Void,
        doc: "Set sprite priority by bitmask.",
    },
    BuiltinFunction {
        name: "sprite_get_priority",
        parameters: &[("sprite", Type::Byte)],
        return_type: Type::Bool,
        doc: "Whether a sprite is drawn behind the background.",
    },
    BuiltinFunction {
        name: "sprite_collision_sprite",
        parameters: &[],
        return_type: Type::Byte,
        doc: "Read and clear the sprite-to-sprite collision register.",
    },
    BuiltinFunction {
        name: "sprite_collision_bg",
        parameters: &[],
        return_type: Type::Byte,
        doc: "Read and clear the sprite-to-background collision register.",
    },
    BuiltinFunction {
        name: "sprite_collides",
        parameters: &[("mask", Type::Byte)],
        return_type: Type::Bool,
        doc: "Whether any sprite in the mask reports a collision.",
    },
];

/// All built-in constants: the 16-color palette and the sprite hardware
/// register addresses.
pub const CONSTANTS: &[BuiltinConstant] = &[
    BuiltinConstant { name: "COLOR_BLACK", ty: Type::Byte, doc: "Palette color 0." },
    BuiltinConstant { name: "COLOR_WHITE", ty: Type::Byte, doc: "Palette color 1." },
    BuiltinConstant { name: "COLOR_RED", ty: Type::Byte, doc: "Palette color 2." },
    BuiltinConstant { name: "COLOR_CYAN", ty: Type::Byte, doc: "Palette color 3." },
    BuiltinConstant { name: "COLOR_PURPLE", ty: Type::Byte, doc: "Palette color 4." },
    BuiltinConstant { name: "COLOR_GREEN", ty: Type::Byte, doc: "Palette color 5." },
    BuiltinConstant { name: "COLOR_BLUE", ty: Type::Byte, doc: "Palette color 6." },
    BuiltinConstant { name: "COLOR_YELLOW", ty: Type::Byte, doc: "Palette color 7." },
    BuiltinConstant { name: "COLOR_ORANGE", ty: Type::Byte, doc: "Palette color 8." },
    BuiltinConstant { name: "COLOR_BROWN", ty: Type::Byte, doc: "Palette color 9." },
    BuiltinConstant { name: "COLOR_LIGHT_RED", ty: Type::Byte, doc: "Palette color 10." },
    BuiltinConstant { name: "COLOR_DARK_GRAY", ty: Type::Byte, doc: "Palette color 11." },
    BuiltinConstant { name: "COLOR_GRAY", ty: Type::Byte, doc: "Palette color 12." },
    BuiltinConstant { name: "COLOR_LIGHT_GREEN", ty: Type::Byte, doc: "Palette color 13." },
    BuiltinConstant { name: "COLOR_LIGHT_BLUE", ty: Type::Byte, doc: "Palette color 14." },
    BuiltinConstant { name: "COLOR_LIGHT_GRAY", ty: Type::Byte, doc: "Palette color 15." },
    BuiltinConstant { name: "VIC_SPRITE_ENABLE", ty: Type::Word, doc: "Sprite enable register." },
    BuiltinConstant { name: "VIC_SPRITE_X_MSB", ty: Type::Word, doc: "Sprite X position MSB register." },
    BuiltinConstant { name: "VIC_SPRITE_EXPAND_Y", ty: Type::Word, doc: "Sprite Y expansion register." },
    BuiltinConstant { name: "VIC_SPRITE_PRIORITY", ty: Type::Word, doc: "Sprite priority register." },
    BuiltinConstant { name: "VIC_SPRITE_MULTICOLOR", ty: Type::Word, doc: "Sprite multicolor mode register." },
    BuiltinConstant { name: "VIC_SPRITE_EXPAND_X", ty: Type::Word, doc: "Sprite X expansion register." },
    BuiltinConstant { name: "VIC_SPRITE_COLLISION_SPRITE", ty: Type::Word, doc: "Sprite-sprite collision register." },
    BuiltinConstant { name: "VIC_SPRITE_COLLISION_BG", ty: Type::Word, doc: "Sprite-background collision register." },
    BuiltinConstant { name: "VIC_SPRITE_MULTICOLOR1", ty: Type::Word, doc: "Shared multicolor 1 register." },
    BuiltinConstant { name: "VIC_SPRITE_MULTICOLOR2", ty: Type::Word, doc: "Shared multicolor 2 register." },
    BuiltinConstant { name: "VIC_SPRITE_POINTER_BASE", ty: Type::Word, doc: "Base of the sprite data pointers." },
    BuiltinConstant { name: "VIC_SPRITE0_X", ty: Type::Word, doc: "Sprite 0 X position register." },
    BuiltinConstant { name: "VIC_SPRITE0_Y", ty: Type::Word, doc: "Sprite 0 Y position register." },
    BuiltinConstant { name: "VIC_SPRITE1_X", ty: Type::Word, doc: "Sprite 1 X position register." },
    BuiltinConstant { name: "VIC_SPRITE1_Y", ty: Type::Word, doc: "Sprite 1 Y position register." },
    BuiltinConstant { name: "VIC_SPRITE2_X", ty: Type::Word, doc: "Sprite 2 X position register." },
    BuiltinConstant { name: "VIC_SPRITE2_Y", ty: Type::Word, doc: "Sprite 2 Y position register." },
    BuiltinConstant { name: "VIC_SPRITE3_X", ty: Type::Word, doc: "Sprite 3 X position register." },
    BuiltinConstant { name: "VIC_SPRITE3_Y", ty: Type::Word, doc: "Sprite 3 Y position register." },
    BuiltinConstant { name: "VIC_SPRITE4_X", ty: Type::Word, doc: "Sprite 4 X position register." },
    BuiltinConstant { name: "VIC_SPRITE4_Y", ty: Type::Word, doc: "Sprite 4 Y position register." },
    BuiltinConstant { name: "VIC_SPRITE5_X", ty: Type::Word, doc: "Sprite 5 X position register." },
    BuiltinConstant { name: "VIC_SPRITE5_Y", ty: Type::Word, doc: "Sprite 5 Y position register." },
    BuiltinConstant { name: "VIC_SPRITE6_X", ty: Type::Word, doc: "Sprite 6 X position register." },
    BuiltinConstant { name: "VIC_SPRITE6_Y", ty: Type::Word, doc: "Sprite 6 Y position register." },
    BuiltinConstant { name: "VIC_SPRITE7_X", ty: Type::Word, doc: "Sprite 7 X position register." },
    BuiltinConstant { name: "VIC_SPRITE7_Y", ty: Type::Word, doc: "Sprite 7 Y position register." },
    BuiltinConstant { name: "VIC_SPRITE0_COLOR", ty: Type::Word, doc: "Sprite 0 color register." },
    BuiltinConstant { name: "VIC_SPRITE1_COLOR", ty: Type::Word, doc: "Sprite 1 color register." },
    BuiltinConstant { name: "VIC_SPRITE2_COLOR", ty: Type::Word, doc: "Sprite 2 color register." },
    BuiltinConstant { name: "VIC_SPRITE3_COLOR", ty: Type::Word, doc: "Sprite 3 color register." },
    BuiltinConstant { name: "VIC_SPRITE4_COLOR", ty: Type::Word, doc: "Sprite 4 color register." },
    BuiltinConstant { name: "VIC_SPRITE5_COLOR", ty: Type::Word, doc: "Sprite 5 color register." },
    BuiltinConstant { name: "VIC_SPRITE6_COLOR", ty: Type::Word, doc: "Sprite 6 color register." },
    BuiltinConstant { name: "VIC_SPRITE7_COLOR", ty: Type::Word, doc: "Sprite 7 color register." },
];

/// Looks up a built-in function by name.
#[must_use]
pub fn function(name: &str) -> Option<&'static BuiltinFunction> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

/// Looks up a built-in constant by name.
#[must_use]
pub fn constant(name: &str) -> Option<&'static BuiltinConstant> {
    CONSTANTS.iter().find(|c| c.name == name)
}
