//! End-to-end tests for the scal binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn scal() -> Command {
    Command::cargo_bin("scal").unwrap()
}

mod conversion {
    use super::*;

    #[test]
    fn gregorian_to_shamsi() {
        scal()
            .args(["--gregorian", "2024-03-20"])
            .assert()
            .success()
            .stdout("Gregorian 2024-03-20 is Shamsi 1403-01-01\n");
    }

    #[test]
    fn shamsi_to_gregorian() {
        scal()
            .args(["-s", "1357-11-22"])
            .assert()
            .success()
            .stdout("Shamsi 1357-11-22 is Gregorian 1979-02-11\n");
    }

    #[test]
    fn output_is_zero_padded() {
        scal()
            .args(["-g", "2024-3-9"])
            .assert()
            .success()
            .stdout("Gregorian 2024-03-09 is Shamsi 1402-12-19\n");
    }

    #[test]
    fn leap_esfand() {
        scal()
            .args(["-s", "1404-12-30"])
            .assert()
            .success()
            .stdout("Shamsi 1404-12-30 is Gregorian 2026-03-20\n");
    }

    #[test]
    fn invalid_day_fails() {
        scal()
            .args(["-s", "1403-12-30"])
            .assert()
            .code(1)
            .stdout("")
            .stderr(predicate::str::starts_with("scal: Invalid day: 30"));
    }

    #[test]
    fn invalid_format_fails() {
        scal()
            .args(["-g", "2024/03/20"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid date format"));
    }

    #[test]
    fn both_directions_conflict() {
        scal()
            .args(["-g", "2024-03-20", "-s", "1403-01-01"])
            .assert()
            .code(1);
    }
}

mod calendar {
    use super::*;

    #[test]
    fn month_and_year() {
        scal()
            .args(["--style", "plain", "1", "1403"])
            .assert()
            .success()
            .stdout(concat!(
                "    Farvardin 1403   \n",
                " Sa Su Mo Tu We Th Fr\n",
                "              1  2  3\n",
                "  4  5  6  7  8  9 10\n",
                " 11 12 13 14 15 16 17\n",
                " 18 19 20 21 22 23 24\n",
                " 25 26 27 28 29 30 31\n",
                "\n",
            ));
    }

    #[test]
    fn current_month_highlights_today() {
        scal()
            .args(["--today", "2024-04-08", "--style", "marker"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("    Farvardin 1403"))
            .stdout(predicate::str::contains(" 18 19>20 21 22 23 24"))
            .stdout(predicate::str::contains(">20").count(1));
    }

    #[test]
    fn other_month_has_no_highlight() {
        scal()
            .args(["--today", "2024-04-08", "--style", "marker", "2", "1403"])
            .assert()
            .success()
            .stdout(predicate::str::contains(">").not());
    }

    #[test]
    fn month_by_name() {
        scal()
            .args(["--today", "2024-04-08", "--style", "plain", "mehr"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("      Mehr 1403"));
    }

    #[test]
    fn color_is_off_when_piped() {
        scal()
            .args(["--today", "2024-04-08"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\x1b[").not());
    }

    #[test]
    fn forced_color() {
        scal()
            .args(["--today", "2024-04-08", "--style", "color"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\x1b[7m20\x1b[0m"));
    }

    #[test]
    fn whole_year() {
        scal()
            .args(["--style", "plain", "--columns", "3", "1403"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(" ".repeat(33) + "1403\n\n"))
            .stdout(predicate::str::contains("Esfand"));
    }

    #[test]
    fn huge_column_count_is_capped() {
        scal()
            .args(["--style", "plain", "-c", "4000000000", "1403"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(" ".repeat(141) + "1403\n\n"));
    }

    #[test]
    fn invalid_month_fails() {
        scal()
            .args(["13", "1403"])
            .assert()
            .code(1)
            .stderr("scal: Invalid month: 13 (must be 1-12)\n");
    }

    #[test]
    fn invalid_year_fails() {
        scal()
            .args(["1", "10000"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid year: 10000"));
    }

    #[test]
    fn invalid_columns_fails() {
        scal()
            .args(["--columns", "0", "1403"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid columns value: 0"));
    }

    #[test]
    fn help_succeeds() {
        scal()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--gregorian"));
    }
}
