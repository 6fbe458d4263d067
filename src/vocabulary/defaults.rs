//! Built-in shunting vocabulary
//!
//! Order matters: it is the tie-break order for fuzzy lookups.

use super::{CommandTable, NumeralEntry, NumeralTable};

const ATOMIC_COMMANDS: &[(&str, i32)] = &[
    ("назад с башмака", 17),
    ("прекратить зарядку тормозной магистрали", 20),
    ("зарядка тормозной магистрали", 6),
    ("вышел из межвагонного пространства", 7),
    ("вперед на башмак", 15),
    ("вперед с башмака", 19),
    ("остановка", 14),
    ("отцепка", 11),
    ("отказ", 0),
    ("растянуть автосцепки", 9),
    ("продолжаем роспуск", 8),
    ("захожу в межвагонное пространство", 13),
    ("тормозить", 21),
    ("отмена", 1),
    ("тише", 18),
    ("отпустить", 22),
    ("начать осаживание", 3),
    ("сжать автосцепки", 16),
    ("продолжаем осаживание", 5),
    ("назад на башмак", 12),
    ("подтверждение", 2),
];

const QUANTITY_COMMANDS: &[(&str, i32)] = &[("протянуть", 10), ("осадить", 4)];

/// (word, value, canonical text)
const NUMERALS: &[(&str, i64, &str)] = &[
    ("один", 1, "один вагон"),
    ("два", 2, "два вагона"),
    ("три", 3, "три вагона"),
    ("четыре", 4, "четыре вагона"),
    ("пять", 5, "пять вагонов"),
    ("шесть", 6, "шесть вагонов"),
    ("семь", 7, "семь вагонов"),
    ("восемь", 8, "восемь вагонов"),
    ("девять", 9, "девять вагонов"),
    ("десять", 10, "десять вагонов"),
    ("одиннадцать", 11, "одиннадцать вагонов"),
    ("двенадцать", 12, "двенадцать вагонов"),
    ("тринадцать", 13, "тринадцать вагонов"),
    ("четырнадцать", 14, "четырнадцать вагонов"),
    ("пятнадцать", 15, "пятнадцать вагонов"),
    ("шестнадцать", 16, "шестнадцать вагонов"),
    ("семнадцать", 17, "семнадцать вагонов"),
    ("восемнадцать", 18, "восемнадцать вагонов"),
    ("девятнадцать", 19, "девятнадцать вагонов"),
    ("двадцать", 20, "двадцать"),
    ("тридцать", 30, "тридцать"),
    ("сорок", 40, "сорок"),
    ("девяносто", 90, "девяносто"),
    ("сто", 100, "сто"),
    ("двести", 200, "двести"),
    ("триста", 300, "триста"),
    ("четыреста", 400, "четыреста"),
    ("пятьсот", 500, "пятьсот"),
    ("шестьсот", 600, "шестьсот"),
    ("семьсот", 700, "семьсот"),
    ("восемьсот", 800, "восемьсот"),
    ("девятьсот", 900, "девятьсот"),
    // Additive, not a multiplier: "две тысячи" does not mean 2000
    ("тысяча", 1000, "тысяча"),
];

pub(super) fn atomic_commands() -> CommandTable {
    CommandTable::from_pairs(ATOMIC_COMMANDS.iter().copied())
}

pub(super) fn quantity_commands() -> CommandTable {
    CommandTable::from_pairs(QUANTITY_COMMANDS.iter().copied())
}

pub(super) fn numerals() -> NumeralTable {
    NUMERALS
        .iter()
        .map(|&(word, value, text)| NumeralEntry::new(word, value, text))
        .collect()
}
