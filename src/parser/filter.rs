//! Filter expressions: `tag`, `*`, `!`, `&`, `|`, and parentheses.
//!
//! Grounded in `original_source/source/parse.c`'s `parse_filter`, a
//! shunting-yard parser with precedence `() ! & |`. The original's operator
//! stack is a fixed `enum operators stack[32]`, so a filter expression with
//! more than 32 unmatched `(`/`!`/`&`/`|` in flight overflows it silently.
//! Here the operator stack is a growable `Vec`, so arbitrarily deep
//! parenthesization and chains of operators just work.

use anyhow::Result;

use crate::ast::filter::{FilterAnd, FilterNot, FilterOr, FilterTag};
use crate::lexer::TokenKind;
use crate::value::Value;

use super::Parser;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Operator {
	Not,
	And,
	Or,
	LParen,
}

impl<'a> Parser<'a> {
	/// Parses a filter expression, leaving `*cursor` just past it.
	pub fn parse_filter(&self, cursor: &mut usize) -> Result<Value<'a>> {
		let mut values: Vec<Value<'a>> = Vec::new();
		let mut operators: Vec<Operator> = Vec::new();

		self.filter_want_term(cursor, &mut values, &mut operators)?;
		loop {
			let token = self.lexer.next_significant(*cursor, self.end);
			match token.kind {
				TokenKind::Amp => {
					self.filter_reduce_while(&mut values, &mut operators, |op| *op <= Operator::And);
					operators.push(Operator::And);
					*cursor = token.end;
					self.filter_want_term(cursor, &mut values, &mut operators)?;
				}
				TokenKind::Pipe => {
					self.filter_reduce_while(&mut values, &mut operators, |op| *op <= Operator::Or);
					operators.push(Operator::Or);
					*cursor = token.end;
					self.filter_want_term(cursor, &mut values, &mut operators)?;
				}
				TokenKind::ParenR => {
					self.filter_reduce_while(&mut values, &mut operators, |op| *op < Operator::LParen);
					if operators.pop() != Some(Operator::LParen) {
						return self.error(token.start, "No matching opening parenthesis.");
					}
					*cursor = token.end;
				}
				TokenKind::Bang | TokenKind::ParenL => {
					return self.error(token.start, "There seems to be a missing operator here.");
				}
				_ => break,
			}
		}

		while let Some(op) = operators.pop() {
			if op == Operator::LParen {
				return self.error(*cursor, "No matching closing parenthesis.");
			}
			self.filter_reduce_one(&mut values, op);
		}

		values.pop().ok_or_else(|| anyhow::anyhow!("internal error: filter value stack empty"))
	}

	fn filter_want_term(&self, cursor: &mut usize, values: &mut Vec<Value<'a>>, operators: &mut Vec<Operator>) -> Result<()> {
		loop {
			let token = self.lexer.next_significant(*cursor, self.end);
			match token.kind {
				TokenKind::Identifier => {
					let tag = self.arena.alloc(FilterTag { tag: token.text });
					values.push(Value::FilterTag(tag));
					*cursor = token.end;
					return Ok(());
				}
				TokenKind::Star => {
					values.push(Value::FilterAny);
					*cursor = token.end;
					return Ok(());
				}
				TokenKind::Bang => {
					operators.push(Operator::Not);
					*cursor = token.end;
				}
				TokenKind::ParenL => {
					operators.push(Operator::LParen);
					*cursor = token.end;
				}
				_ => return self.error(token.start, "There seems to be a missing term here."),
			}
		}
	}

	fn filter_reduce_while(&self, values: &mut Vec<Value<'a>>, operators: &mut Vec<Operator>, keep_reducing: impl Fn(&Operator) -> bool) {
		while let Some(op) = operators.last().copied() {
			if !keep_reducing(&op) {
				break;
			}
			operators.pop();
			self.filter_reduce_one(values, op);
		}
	}

	fn filter_reduce_one(&self, values: &mut Vec<Value<'a>>, op: Operator) {
		match op {
			Operator::Not => {
				let test = values.pop().expect("shunting-yard invariant: operand present for !");
				let not = self.arena.alloc(FilterNot { test });
				values.push(Value::FilterNot(not));
			}
			Operator::And => {
				let test_a = values.pop().expect("shunting-yard invariant: operand present for &");
				let test_b = values.pop().expect("shunting-yard invariant: operand present for &");
				let and = self.arena.alloc(FilterAnd { test_a, test_b });
				values.push(Value::FilterAnd(and));
			}
			Operator::Or => {
				let test_a = values.pop().expect("shunting-yard invariant: operand present for |");
				let test_b = values.pop().expect("shunting-yard invariant: operand present for |");
				let or = self.arena.alloc(FilterOr { test_a, test_b });
				values.push(Value::FilterOr(or));
			}
			Operator::LParen => unreachable!("LParen is never reduced, only popped"),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use crate::arena::Arena;
	use crate::value::Value;

	use super::super::Parser;

	fn parse(source: &str) -> (Arena, String) {
		let arena = Arena::new();
		(arena, source.to_string())
	}

	#[test]
	fn single_tag() {
		let (arena, source) = parse("foo");
		let parser = Parser::new(&arena, Rc::from("test"), &source);
		let mut cursor = 0;
		let value = parser.parse_filter(&mut cursor).unwrap();
		assert!(matches!(value, Value::FilterTag(t) if t.tag == "foo"));
	}

	#[test]
	fn not_binds_tighter_than_and() {
		let (arena, source) = parse("!foo & bar");
		let parser = Parser::new(&arena, Rc::from("test"), &source);
		let mut cursor = 0;
		let value = parser.parse_filter(&mut cursor).unwrap();
		match value {
			Value::FilterAnd(and) => {
				assert!(matches!(and.test_a, Value::FilterTag(_)) || matches!(and.test_a, Value::FilterNot(_)));
				assert!(matches!(and.test_b, Value::FilterTag(_)) || matches!(and.test_b, Value::FilterNot(_)));
			}
			_ => panic!("expected an AND at the top"),
		}
	}

	#[test]
	fn deeply_nested_parens_do_not_overflow() {
		let depth = 200;
		let mut source = String::new();
		for _ in 0..depth {
			source.push('(');
		}
		source.push_str("foo");
		for _ in 0..depth {
			source.push(')');
		}
		let arena = Arena::new();
		let parser = Parser::new(&arena, Rc::from("test"), &source);
		let mut cursor = 0;
		let value = parser.parse_filter(&mut cursor).unwrap();
		assert!(matches!(value, Value::FilterTag(t) if t.tag == "foo"));
	}

	#[test]
	fn unmatched_closing_paren_is_an_error() {
		let (arena, source) = parse("foo)");
		let parser = Parser::new(&arena, Rc::from("test"), &source);
		let mut cursor = 0;
		assert!(parser.parse_filter(&mut cursor).is_err());
	}
}
